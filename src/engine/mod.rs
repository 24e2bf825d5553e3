//! Simulation Engine
//!
//! Deterministic day-by-day model of a staged gas field development.
//! Every run is a pure function of its parameters: no globals, no I/O,
//! no state carried between calls.
//!
//! ## Components
//! - `decline` - exponential decline curve
//! - `well` - per-well lifecycle stages and construction milestones
//! - `scheduler` - rig batch timing
//! - `ledger` - cumulative expense and income
//! - `field` - append-only well collection
//! - `clock` - the daily driver composing the above

pub mod clock;
pub mod decline;
pub mod field;
pub mod ledger;
pub mod scheduler;
pub mod well;

pub use clock::SimulationClock;
pub use decline::{decline_constant, flow, DeclineCurve};
pub use field::Field;
pub use ledger::EconomicLedger;
pub use scheduler::FieldScheduler;
pub use well::{ConstructionSchedule, Milestone, Well, WellId, WellStage, WellTick};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::defaults::{DEFAULT_FIELD_NAME, PARALLEL_WELL_THRESHOLD};
use crate::types::{SimulationError, SimulationParameters, SimulationResult};

/// Execution tuning. Never changes the numbers a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Well count at which per-well updates move onto the rayon pool.
    /// 0 keeps every tick sequential.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_well_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    PARALLEL_WELL_THRESHOLD
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel_well_threshold: default_parallel_threshold(),
        }
    }
}

/// Run a simulation for the default field with default options.
pub fn simulate(params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
    simulate_field(DEFAULT_FIELD_NAME, params, EngineOptions::default())
}

/// Validate `params`, then run every day of the horizon.
///
/// Validation is eager: any broken rule fails the call before the first
/// tick with all violations listed.
pub fn simulate_field(
    field_name: &str,
    params: &SimulationParameters,
    options: EngineOptions,
) -> Result<SimulationResult, SimulationError> {
    let resolved = params.resolve()?;
    info!(
        field = field_name,
        days = resolved.total_days,
        rigs = resolved.rigs_per_batch,
        decline_constant = resolved.decline_constant,
        "Starting field simulation"
    );
    SimulationClock::new(field_name, &resolved, options).run()
}
