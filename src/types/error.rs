//! Engine error type.

use thiserror::Error;

/// Errors a simulation run can fail with.
///
/// Runs are deterministic, so neither variant is worth retrying with the
/// same parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// One or more input rules were broken. Raised before the first tick.
    #[error("invalid simulation parameters: {}", .0.join("; "))]
    InvalidParameter(Vec<String>),

    /// A computed quantity left the finite range mid-run.
    #[error("non-finite {quantity} on day {day} ({value})")]
    NonFinite {
        quantity: &'static str,
        day: u64,
        value: f64,
    },
}

impl SimulationError {
    /// Short machine-readable code used in API error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            SimulationError::InvalidParameter(_) => "INVALID_PARAMETER",
            SimulationError::NonFinite { .. } => "COMPUTATION_ERROR",
        }
    }
}
