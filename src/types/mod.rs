//! Shared data structures for the field development simulator
//!
//! - `SimulationParameters`: operator input record (wire format)
//! - `ResolvedParameters`: validated input in engine units
//! - `DailySample` / `SimulationResult`: per-day output series
//! - `SimulationError`: validation and numeric failures

mod error;
mod params;
mod result;

pub use error::*;
pub use params::*;
pub use result::*;
