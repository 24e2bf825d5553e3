//! Well lifecycle: construction stages, milestones and production.
//!
//! A well's stage is a pure function of its age and the construction
//! schedule. Each day the well re-derives its stage, reports the milestone
//! (if any) whose boundary it sits on, and recomputes its rate.
//!
//! ```text
//! age:  0 ── drill ── +fracWait ── +frac ── +pipeWait ──────────▶
//!       Drilling │ WaitingOnFrac │ Fraccing │ WaitingOnPipeline │ Producing
//!                ▲ DrillComplete           ▲ FracComplete      ▲ TieIn
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::decline::DeclineCurve;
use crate::types::{CapitalCosts, ConstructionDurations};

// ============================================================================
// Identity
// ============================================================================

/// Stable well identifier, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WellId(pub u64);

impl std::fmt::Display for WellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W-{:04}", self.0)
    }
}

// ============================================================================
// Stages and Milestones
// ============================================================================

/// Lifecycle stage of a well.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum WellStage {
    #[default]
    Drilling,
    WaitingOnFrac,
    Fraccing,
    WaitingOnPipeline,
    /// Terminal for the simulation horizon; rate declines indefinitely
    Producing,
}

impl WellStage {
    /// Stage that follows this one, `None` once producing.
    pub const fn next(self) -> Option<Self> {
        match self {
            WellStage::Drilling => Some(WellStage::WaitingOnFrac),
            WellStage::WaitingOnFrac => Some(WellStage::Fraccing),
            WellStage::Fraccing => Some(WellStage::WaitingOnPipeline),
            WellStage::WaitingOnPipeline => Some(WellStage::Producing),
            WellStage::Producing => None,
        }
    }

    /// Milestone booked when a well enters this stage.
    pub const fn entry_milestone(self) -> Option<Milestone> {
        match self {
            WellStage::WaitingOnFrac => Some(Milestone::DrillComplete),
            WellStage::WaitingOnPipeline => Some(Milestone::FracComplete),
            WellStage::Producing => Some(Milestone::TieIn),
            WellStage::Drilling | WellStage::Fraccing => None,
        }
    }
}

impl std::fmt::Display for WellStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellStage::Drilling => write!(f, "Drilling"),
            WellStage::WaitingOnFrac => write!(f, "Waiting on Frac"),
            WellStage::Fraccing => write!(f, "Fraccing"),
            WellStage::WaitingOnPipeline => write!(f, "Waiting on Pipeline"),
            WellStage::Producing => write!(f, "Producing"),
        }
    }
}

/// Capital-bearing construction event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Milestone {
    DrillComplete,
    FracComplete,
    TieIn,
}

impl Milestone {
    pub const fn cost(self, costs: &CapitalCosts) -> f64 {
        match self {
            Milestone::DrillComplete => costs.drill,
            Milestone::FracComplete => costs.frac,
            Milestone::TieIn => costs.tie_in,
        }
    }
}

// ============================================================================
// Construction Schedule
// ============================================================================

/// Cumulative age thresholds at which each stage begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionSchedule {
    frac_wait_start: u64,
    frac_start: u64,
    pipe_wait_start: u64,
    production_start: u64,
}

impl ConstructionSchedule {
    /// Validated durations are capped well below overflow; sums saturate
    /// for anything built by hand.
    pub const fn new(d: &ConstructionDurations) -> Self {
        let frac_wait_start = d.drill;
        let frac_start = frac_wait_start.saturating_add(d.frac_wait);
        let pipe_wait_start = frac_start.saturating_add(d.frac);
        Self {
            frac_wait_start,
            frac_start,
            pipe_wait_start,
            production_start: pipe_wait_start.saturating_add(d.pipe_wait),
        }
    }

    /// Age at which a stage begins.
    pub const fn stage_start(&self, stage: WellStage) -> u64 {
        match stage {
            WellStage::Drilling => 0,
            WellStage::WaitingOnFrac => self.frac_wait_start,
            WellStage::Fraccing => self.frac_start,
            WellStage::WaitingOnPipeline => self.pipe_wait_start,
            WellStage::Producing => self.production_start,
        }
    }

    /// Total non-producing duration (days).
    pub const fn production_start(&self) -> u64 {
        self.production_start
    }

    pub const fn stage_at(&self, age: u64) -> WellStage {
        if age >= self.production_start {
            WellStage::Producing
        } else if age >= self.pipe_wait_start {
            WellStage::WaitingOnPipeline
        } else if age >= self.frac_start {
            WellStage::Fraccing
        } else if age >= self.frac_wait_start {
            WellStage::WaitingOnFrac
        } else {
            WellStage::Drilling
        }
    }

    /// Milestone whose boundary falls exactly on `age`.
    ///
    /// Level-triggered: ages advance by one per day, so each boundary is
    /// hit on exactly one day of a well's life.
    pub fn milestone_at(&self, age: u64) -> Option<Milestone> {
        let stage = self.stage_at(age);
        if age == self.stage_start(stage) {
            stage.entry_milestone()
        } else {
            None
        }
    }
}

// ============================================================================
// Well
// ============================================================================

/// Outcome of one well's daily update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellTick {
    pub milestone: Option<Milestone>,
    /// Rate delivered to sales today (0 on the tie-in day)
    pub sales_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Well {
    pub id: WellId,
    age: u64,
    stage: WellStage,
    flow_rate: f64,
}

impl Well {
    pub const fn new(id: WellId) -> Self {
        Self {
            id,
            age: 0,
            stage: WellStage::Drilling,
            flow_rate: 0.0,
        }
    }

    pub const fn age(&self) -> u64 {
        self.age
    }

    pub const fn stage(&self) -> WellStage {
        self.stage
    }

    /// Current rate (scf/day). Zero until the well is producing.
    pub const fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    /// Re-derive stage, milestone and rate for the current age.
    ///
    /// On the tie-in day the well reports its peak rate but sells nothing;
    /// sales begin the following day.
    pub fn tick(&mut self, schedule: &ConstructionSchedule, curve: &DeclineCurve) -> WellTick {
        let stage = schedule.stage_at(self.age);
        if stage != self.stage {
            trace!(well = %self.id, age = self.age, from = %self.stage, to = %stage, "Stage transition");
            self.stage = stage;
        }

        let milestone = schedule.milestone_at(self.age);

        let sales_rate = match self.age.checked_sub(schedule.production_start()) {
            Some(elapsed) => {
                self.flow_rate = curve.rate_after(elapsed);
                if elapsed > 0 {
                    self.flow_rate
                } else {
                    0.0
                }
            }
            None => {
                self.flow_rate = 0.0;
                0.0
            }
        };

        WellTick {
            milestone,
            sales_rate,
        }
    }

    pub fn advance_age(&mut self) {
        self.age += 1;
    }
}
