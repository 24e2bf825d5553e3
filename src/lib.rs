//! Gasfield-Sim: staged natural-gas field development simulator
//!
//! Drills wells in rig batches, carries each through a fixed construction
//! pipeline, produces them on an exponential decline and books capital and
//! revenue day by day over a multi-year horizon.
//!
//! ## Architecture
//!
//! - **Engine**: deterministic daily simulation (decline, well lifecycle,
//!   batch scheduling, economic ledger, clock)
//! - **Types**: parameter record, per-day samples, errors
//! - **Config**: TOML configuration with typo detection and validation
//! - **API**: axum HTTP service wrapping the engine

pub mod api;
pub mod config;
pub mod engine;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, FieldConfig};

// Re-export engine entry points
pub use engine::{simulate, simulate_field, EngineOptions};

// Re-export commonly used types
pub use types::{
    DailySample, ResolvedParameters, SimulationError, SimulationParameters, SimulationResult,
    SimulationSeries, SimulationSummary,
};
