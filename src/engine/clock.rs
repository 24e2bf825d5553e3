//! Day-stepping driver.
//!
//! Each tick:
//! 1. the scheduler may spud a new batch (invisible to this tick),
//! 2. every pre-existing well updates stage, books milestone costs and
//!    reports its sales rate,
//! 3. field flow is summed in creation order and booked as revenue,
//! 4. all wells age by one day,
//! 5. one [`DailySample`] is recorded.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::decline::DeclineCurve;
use super::field::Field;
use super::ledger::EconomicLedger;
use super::scheduler::FieldScheduler;
use super::well::{ConstructionSchedule, WellTick};
use super::EngineOptions;
use crate::types::{DailySample, ResolvedParameters, SimulationError, SimulationResult};

/// Owns all state for a single run. Consumed by [`SimulationClock::run`].
#[derive(Debug)]
pub struct SimulationClock {
    day: u64,
    final_day: u64,
    field: Field,
    ledger: EconomicLedger,
    scheduler: FieldScheduler,
    schedule: ConstructionSchedule,
    curve: DeclineCurve,
    target_flow: f64,
    options: EngineOptions,
    samples: Vec<DailySample>,
}

impl SimulationClock {
    /// Set up the field with its initial batch. The clock starts at day 0.
    pub fn new(field_name: &str, params: &ResolvedParameters, options: EngineOptions) -> Self {
        let scheduler = FieldScheduler::new(params.construction.drill, params.rigs_per_batch);
        let mut field = Field::new(field_name);
        field.spud(scheduler.initial_batch());

        let capacity = usize::try_from(params.total_days.saturating_add(1)).unwrap_or(0);

        Self {
            day: 0,
            final_day: params.total_days,
            field,
            ledger: EconomicLedger::new(params.gas_price_aud, params.costs),
            scheduler,
            schedule: ConstructionSchedule::new(&params.construction),
            curve: DeclineCurve::new(params.peak_rate, params.decline_constant),
            target_flow: params.target_flow,
            options,
            samples: Vec::with_capacity(capacity),
        }
    }

    pub const fn day(&self) -> u64 {
        self.day
    }

    pub const fn is_finished(&self) -> bool {
        self.day > self.final_day
    }

    pub const fn field(&self) -> &Field {
        &self.field
    }

    pub const fn ledger(&self) -> &EconomicLedger {
        &self.ledger
    }

    /// Run every remaining day and hand back the full series.
    pub fn run(mut self) -> Result<SimulationResult, SimulationError> {
        while !self.is_finished() {
            self.step()?;
        }
        debug!(
            field = %self.field.name,
            days = self.samples.len(),
            wells = self.field.len(),
            "Simulation complete"
        );
        Ok(SimulationResult::new(self.target_flow, self.samples))
    }

    /// Advance one day.
    pub(crate) fn step(&mut self) -> Result<(), SimulationError> {
        let day = self.day;

        // Wells spudded today sit outside this tick's update pass
        let existing = self.field.len();
        let due = self.scheduler.wells_due(day);
        if due > 0 {
            self.field.spud(due);
            trace!(day, wells = due, total = self.field.len(), "Rig batch spudded");
        }

        let ticks = self.tick_wells(existing);

        // Reduce in creation order so the float sum is reproducible
        let mut field_flow = 0.0;
        for tick in &ticks {
            if let Some(milestone) = tick.milestone {
                let cost = self.ledger.charge(milestone);
                trace!(day, ?milestone, cost, "Milestone cost booked");
            }
            field_flow += tick.sales_rate;
        }
        if !field_flow.is_finite() {
            return Err(SimulationError::NonFinite {
                quantity: "field flow",
                day,
                value: field_flow,
            });
        }
        self.ledger.book_production(field_flow);
        self.ledger.check_finite(day)?;

        let first_well_flow = self.field.trace_flow();
        if !first_well_flow.is_finite() {
            return Err(SimulationError::NonFinite {
                quantity: "first well flow",
                day,
                value: first_well_flow,
            });
        }

        for well in self.field.wells_mut() {
            well.advance_age();
        }

        self.samples.push(DailySample {
            day,
            field_flow,
            expense: self.ledger.expense(),
            income: self.ledger.income(),
            first_well_flow,
            exposure: self.ledger.exposure(),
            well_count: self.field.well_count(),
        });

        self.day += 1;
        Ok(())
    }

    /// Update the first `count` wells, in parallel above the configured
    /// threshold. Output order always matches creation order.
    fn tick_wells(&mut self, count: usize) -> Vec<WellTick> {
        let schedule = self.schedule;
        let curve = self.curve;
        let threshold = self.options.parallel_well_threshold;
        let wells = &mut self.field.wells_mut()[..count];

        if threshold > 0 && count >= threshold {
            wells
                .par_iter_mut()
                .map(|w| w.tick(&schedule, &curve))
                .collect()
        } else {
            wells.iter_mut().map(|w| w.tick(&schedule, &curve)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationParameters;

    fn clock(params: &SimulationParameters) -> SimulationClock {
        let resolved = params.resolve().unwrap();
        SimulationClock::new("Test", &resolved, EngineOptions::default())
    }

    #[test]
    fn test_initial_batch_exists_before_first_tick() {
        let c = clock(&SimulationParameters::default());
        assert_eq!(c.day(), 0);
        assert_eq!(c.field().len(), 2);
        assert_eq!(c.ledger().expense(), 0.0);
    }

    #[test]
    fn test_new_batch_not_ticked_on_creation_day() {
        let params = SimulationParameters {
            num_rigs: 1,
            ..Default::default()
        };
        let mut c = clock(&params);
        for _ in 0..30 {
            c.step().unwrap();
        }
        // Day 30: second well spudded, first well finishes drilling
        c.step().unwrap();
        assert_eq!(c.field().len(), 2);
        let ages: Vec<u64> = c.field().wells().iter().map(|w| w.age()).collect();
        assert_eq!(ages, vec![31, 1]);
        assert!((c.ledger().expense() - 3.0e6).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_trace_flow_on_tie_in_day_is_error() {
        // Hand-built so the tie-in day reports an infinite rate while
        // selling nothing; resolve() never produces this.
        let mut resolved = SimulationParameters {
            num_rigs: 1,
            sim_time: 1.0,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        resolved.peak_rate = f64::INFINITY;

        let err = SimulationClock::new("Test", &resolved, EngineOptions::default())
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::NonFinite {
                quantity: "first well flow",
                day: 260,
                value: f64::INFINITY,
            }
        );
        assert_eq!(err.code(), "COMPUTATION_ERROR");
    }

    #[test]
    fn test_step_stops_at_final_day_inclusive() {
        let params = SimulationParameters {
            sim_time: 1.0,
            ..Default::default()
        };
        let result = clock(&params).run().unwrap();
        assert_eq!(result.len(), 366);
        assert_eq!(result.last().map(|s| s.day), Some(365));
    }
}
