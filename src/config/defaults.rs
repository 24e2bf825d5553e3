//! System-wide default constants.
//!
//! Unit conversions and limits used by the engine and the service layer.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Units
// ============================================================================

/// Days in a simulation year (no leap days).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Operator inputs for costs and well rate are entered in millions.
pub const MILLION: f64 = 1.0e6;

/// Standard cubic feet of gas per gigajoule.
///
/// `revenue/day = price_aud_per_gj * flow_scf_per_day / SCF_PER_GJ`
pub const SCF_PER_GJ: f64 = 947.8171;

/// Standard cubic feet of gas per terajoule (target flow reference).
pub const SCF_PER_TJ: f64 = 947_817.12;

// ============================================================================
// Engine
// ============================================================================

/// Field name used when none is configured.
pub const DEFAULT_FIELD_NAME: &str = "Fairfields";

/// Longest accepted simulation horizon (years).
pub const MAX_SIMULATION_YEARS: f64 = 100.0;

/// Longest accepted single construction phase (days).
pub const MAX_STAGE_DAYS: i64 = 36_500;

/// Most wells a single run may create over its horizon.
pub const MAX_FIELD_WELLS: i64 = 1_000_000;

/// Well count at which per-well tick updates run on the rayon pool.
pub const PARALLEL_WELL_THRESHOLD: usize = 4_096;

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Wall-clock limit for a single simulation request (seconds).
pub const RUN_TIMEOUT_SECS: u64 = 30;

/// Largest accepted request body (bytes). A parameter record is well under 1 KiB.
pub const MAX_BODY_BYTES: usize = 64 * 1024;
