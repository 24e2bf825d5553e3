//! Simulation input record and its validated, unit-resolved form.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    DAYS_PER_YEAR, MAX_FIELD_WELLS, MAX_SIMULATION_YEARS, MAX_STAGE_DAYS, MILLION, SCF_PER_TJ,
};

use super::SimulationError;

// ============================================================================
// Wire Record
// ============================================================================

/// Parameter record as entered by an operator.
///
/// Field names on the wire (JSON and TOML) match the dashboard inputs:
/// `gasPrice`, `exchangeRate`, `costToDrill`, ... Units are the operator's
/// units (millions, MMscf/day, years, days); conversion to engine units
/// happens once in [`SimulationParameters::resolve`].
///
/// Integer fields are signed so a negative entry reaches validation and is
/// reported alongside every other violation instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Gas price (USD/GJ)
    pub gas_price: f64,
    /// Exchange rate (AUD per USD)
    pub exchange_rate: f64,
    /// Drilling cost per well (millions)
    pub cost_to_drill: f64,
    /// Fracture stimulation cost per well (millions)
    pub cost_to_frac: f64,
    /// Tie-in cost per well (millions)
    pub cost_to_tie_in: f64,
    /// Peak well rate (MMscf/day)
    pub ave_flow: f64,
    /// Years for a well to decline to 10 % of peak
    pub ave_decline: f64,
    /// Drilling duration (days)
    pub drill_time: i64,
    /// Wait between rig release and frac crew (days)
    pub frac_wait_time: i64,
    /// Frac duration (days)
    pub frac_time: i64,
    /// Wait between frac and pipeline tie-in (days)
    pub pipe_wait_time: i64,
    /// Wells spudded per batch
    pub num_rigs: i64,
    /// Target field rate (TJ/day), reference line only
    pub tgt_flow: f64,
    /// Simulation horizon (years)
    pub sim_time: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gas_price: 10.0,
            exchange_rate: 1.31,
            cost_to_drill: 3.0,
            cost_to_frac: 2.0,
            cost_to_tie_in: 0.5,
            ave_flow: 1.0,
            ave_decline: 4.0,
            drill_time: 30,
            frac_wait_time: 60,
            frac_time: 10,
            pipe_wait_time: 160,
            num_rigs: 2,
            tgt_flow: 25.0,
            sim_time: 5.0,
        }
    }
}

impl SimulationParameters {
    /// Check every rule and return all violations at once.
    ///
    /// An empty vector means the record is runnable.
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let reals = [
            ("gasPrice", self.gas_price),
            ("exchangeRate", self.exchange_rate),
            ("costToDrill", self.cost_to_drill),
            ("costToFrac", self.cost_to_frac),
            ("costToTieIn", self.cost_to_tie_in),
            ("aveFlow", self.ave_flow),
            ("aveDecline", self.ave_decline),
            ("tgtFlow", self.tgt_flow),
            ("simTime", self.sim_time),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number (got {value})"));
            }
        }

        // Currency and flow inputs: zero is allowed, negative is not
        for (name, value) in [
            ("gasPrice", self.gas_price),
            ("exchangeRate", self.exchange_rate),
            ("costToDrill", self.cost_to_drill),
            ("costToFrac", self.cost_to_frac),
            ("costToTieIn", self.cost_to_tie_in),
            ("aveFlow", self.ave_flow),
            ("tgtFlow", self.tgt_flow),
        ] {
            if value < 0.0 {
                errors.push(format!("{name} = {value} cannot be negative"));
            }
        }

        for (name, value) in [
            ("drillTime", self.drill_time),
            ("fracWaitTime", self.frac_wait_time),
            ("fracTime", self.frac_time),
            ("pipeWaitTime", self.pipe_wait_time),
        ] {
            if value <= 0 {
                errors.push(format!("{name} = {value} must be > 0 days"));
            } else if value > MAX_STAGE_DAYS {
                errors.push(format!(
                    "{name} = {value} exceeds the {MAX_STAGE_DAYS}-day phase limit"
                ));
            }
        }

        if self.num_rigs < 0 {
            errors.push(format!("numRigs = {} cannot be negative", self.num_rigs));
        } else if let Some(wells) = self.planned_wells() {
            if wells > MAX_FIELD_WELLS {
                errors.push(format!(
                    "numRigs = {} would create more than {MAX_FIELD_WELLS} wells over the horizon",
                    self.num_rigs
                ));
            }
        }

        // Decline constant is ln(10) / aveDecline
        if self.ave_decline <= 0.0 {
            errors.push(format!(
                "aveDecline = {} must be > 0 years (used as divisor)",
                self.ave_decline
            ));
        }

        if self.sim_time <= 0.0 {
            errors.push(format!("simTime = {} must be > 0 years", self.sim_time));
        } else if self.sim_time > MAX_SIMULATION_YEARS {
            errors.push(format!(
                "simTime = {} exceeds the {MAX_SIMULATION_YEARS}-year horizon limit",
                self.sim_time
            ));
        }

        errors
    }

    /// Upper bound on wells created over the horizon: the initial batch plus
    /// one batch per drilling interval.
    ///
    /// `None` when the inputs it depends on are themselves invalid (reported
    /// elsewhere). Saturates at `i64::MAX`.
    fn planned_wells(&self) -> Option<i64> {
        let horizon_ok = self.sim_time.is_finite()
            && self.sim_time > 0.0
            && self.sim_time <= MAX_SIMULATION_YEARS;
        if !horizon_ok || self.drill_time <= 0 || self.num_rigs < 0 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)]
        let total_days = (self.sim_time * DAYS_PER_YEAR).floor() as i64;
        let batches = total_days / self.drill_time + 1;
        Some(self.num_rigs.saturating_mul(batches))
    }

    /// Validate eagerly and convert to engine units.
    ///
    /// Fails with [`SimulationError::InvalidParameter`] carrying every
    /// violation when any rule is broken, including inputs that are finite
    /// but convert to a non-finite engine quantity.
    pub fn resolve(&self) -> Result<ResolvedParameters, SimulationError> {
        let errors = self.violations();
        if !errors.is_empty() {
            return Err(SimulationError::InvalidParameter(errors));
        }

        let days = |value: i64| u64::try_from(value).unwrap_or_default();
        let decline_days = self.ave_decline * DAYS_PER_YEAR;

        // simTime is finite, positive and capped, so the floor fits in u64
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total_days = (self.sim_time * DAYS_PER_YEAR).floor() as u64;

        let resolved = ResolvedParameters {
            gas_price_aud: self.gas_price * self.exchange_rate,
            costs: CapitalCosts {
                drill: self.cost_to_drill * MILLION,
                frac: self.cost_to_frac * MILLION,
                tie_in: self.cost_to_tie_in * MILLION,
            },
            peak_rate: self.ave_flow * MILLION,
            decline_days,
            decline_constant: crate::engine::decline::decline_constant(decline_days),
            construction: ConstructionDurations {
                drill: days(self.drill_time),
                frac_wait: days(self.frac_wait_time),
                frac: days(self.frac_time),
                pipe_wait: days(self.pipe_wait_time),
            },
            rigs_per_batch: days(self.num_rigs),
            target_flow: self.tgt_flow * SCF_PER_TJ,
            total_days,
        };

        let derived = [
            ("gasPrice × exchangeRate", resolved.gas_price_aud),
            ("costToDrill", resolved.costs.drill),
            ("costToFrac", resolved.costs.frac),
            ("costToTieIn", resolved.costs.tie_in),
            ("aveFlow", resolved.peak_rate),
            ("aveDecline", resolved.decline_constant),
            ("tgtFlow", resolved.target_flow),
        ];
        let errors: Vec<String> = derived
            .iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, value)| format!("{name} is out of range (converts to {value})"))
            .collect();
        if !errors.is_empty() {
            return Err(SimulationError::InvalidParameter(errors));
        }

        Ok(resolved)
    }
}

// ============================================================================
// Resolved Form
// ============================================================================

/// Capital outlay per well milestone (currency units, not millions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalCosts {
    pub drill: f64,
    pub frac: f64,
    pub tie_in: f64,
}

/// Duration of each non-producing construction phase (days, all > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionDurations {
    pub drill: u64,
    pub frac_wait: u64,
    pub frac: u64,
    pub pipe_wait: u64,
}

/// Parameters after validation and unit conversion.
///
/// Only obtainable through [`SimulationParameters::resolve`], so every
/// instance satisfies the input rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameters {
    /// Gas price in AUD/GJ
    pub gas_price_aud: f64,
    pub costs: CapitalCosts,
    /// Peak well rate (scf/day)
    pub peak_rate: f64,
    /// Producing days to reach 10 % of peak
    pub decline_days: f64,
    /// Exponential decline constant (1/day)
    pub decline_constant: f64,
    pub construction: ConstructionDurations,
    pub rigs_per_batch: u64,
    /// Target field rate reference (scf/day)
    pub target_flow: f64,
    /// Last simulated day (inclusive)
    pub total_days: u64,
}
