//! Per-day output series and derived headline figures.

use serde::{Deserialize, Serialize};

/// One simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    /// Day index, starting at 0
    pub day: u64,
    /// Field sales rate (scf/day)
    pub field_flow: f64,
    /// Cumulative capital spent
    pub expense: f64,
    /// Cumulative gas revenue
    pub income: f64,
    /// Rate of the first well ever created (decline trace)
    pub first_well_flow: f64,
    /// `income - expense`
    pub exposure: f64,
    /// Wells in the field after this day's batch
    pub well_count: u64,
}

/// Complete output of one run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Target field rate reference (scf/day), for charting only
    pub target_flow: f64,
    samples: Vec<DailySample>,
}

/// The same output as seven aligned columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSeries {
    pub day: Vec<u64>,
    pub field_flow: Vec<f64>,
    pub expense: Vec<f64>,
    pub income: Vec<f64>,
    pub first_well_flow: Vec<f64>,
    pub exposure: Vec<f64>,
    pub well_count: Vec<u64>,
    pub target_flow: f64,
}

/// Headline figures derived from a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_days: u64,
    pub final_well_count: u64,
    pub peak_field_flow: f64,
    pub peak_flow_day: u64,
    pub final_expense: f64,
    pub final_income: f64,
    pub final_exposure: f64,
    /// Lowest exposure reached (maximum cash deficit when negative)
    pub min_exposure: f64,
    /// First day with spend on the books where income covers it
    pub payback_day: Option<u64>,
    /// First day field flow reaches the target reference
    pub target_reached_day: Option<u64>,
}

impl SimulationResult {
    pub(crate) fn new(target_flow: f64, samples: Vec<DailySample>) -> Self {
        Self {
            target_flow,
            samples,
        }
    }

    pub fn samples(&self) -> &[DailySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample for a given day, if the run covered it.
    pub fn day(&self, day: u64) -> Option<&DailySample> {
        usize::try_from(day).ok().and_then(|i| self.samples.get(i))
    }

    pub fn last(&self) -> Option<&DailySample> {
        self.samples.last()
    }

    /// Split the samples into aligned columns.
    pub fn series(&self) -> SimulationSeries {
        let n = self.samples.len();
        let mut series = SimulationSeries {
            day: Vec::with_capacity(n),
            field_flow: Vec::with_capacity(n),
            expense: Vec::with_capacity(n),
            income: Vec::with_capacity(n),
            first_well_flow: Vec::with_capacity(n),
            exposure: Vec::with_capacity(n),
            well_count: Vec::with_capacity(n),
            target_flow: self.target_flow,
        };
        for s in &self.samples {
            series.day.push(s.day);
            series.field_flow.push(s.field_flow);
            series.expense.push(s.expense);
            series.income.push(s.income);
            series.first_well_flow.push(s.first_well_flow);
            series.exposure.push(s.exposure);
            series.well_count.push(s.well_count);
        }
        series
    }

    pub fn summary(&self) -> SimulationSummary {
        let mut summary = SimulationSummary {
            total_days: self.samples.last().map_or(0, |s| s.day),
            final_well_count: 0,
            peak_field_flow: 0.0,
            peak_flow_day: 0,
            final_expense: 0.0,
            final_income: 0.0,
            final_exposure: 0.0,
            min_exposure: 0.0,
            payback_day: None,
            target_reached_day: None,
        };

        for s in &self.samples {
            if s.field_flow > summary.peak_field_flow {
                summary.peak_field_flow = s.field_flow;
                summary.peak_flow_day = s.day;
            }
            summary.min_exposure = summary.min_exposure.min(s.exposure);
            if summary.payback_day.is_none() && s.expense > 0.0 && s.exposure >= 0.0 {
                summary.payback_day = Some(s.day);
            }
            if summary.target_reached_day.is_none()
                && self.target_flow > 0.0
                && s.field_flow >= self.target_flow
            {
                summary.target_reached_day = Some(s.day);
            }
        }

        if let Some(last) = self.samples.last() {
            summary.final_well_count = last.well_count;
            summary.final_expense = last.expense;
            summary.final_income = last.income;
            summary.final_exposure = last.exposure;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(day: u64, field_flow: f64, expense: f64, income: f64) -> DailySample {
        DailySample {
            day,
            field_flow,
            expense,
            income,
            first_well_flow: field_flow,
            exposure: income - expense,
            well_count: 1,
        }
    }

    #[test]
    fn test_series_columns_align() {
        let result = SimulationResult::new(
            5.0,
            vec![sample(0, 0.0, 0.0, 0.0), sample(1, 2.0, 1.0, 0.5)],
        );
        let series = result.series();
        assert_eq!(series.day, vec![0, 1]);
        assert_eq!(series.field_flow.len(), 2);
        assert_eq!(series.well_count.len(), 2);
        assert!((series.exposure[1] + 0.5).abs() < 1e-12);
        assert!((series.target_flow - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_payback_and_target() {
        let result = SimulationResult::new(
            10.0,
            vec![
                sample(0, 0.0, 0.0, 0.0),
                sample(1, 4.0, 100.0, 10.0),
                sample(2, 12.0, 100.0, 60.0),
                sample(3, 8.0, 100.0, 120.0),
            ],
        );
        let summary = result.summary();
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.peak_flow_day, 2);
        assert!((summary.peak_field_flow - 12.0).abs() < 1e-12);
        assert!((summary.min_exposure + 90.0).abs() < 1e-12);
        assert_eq!(summary.payback_day, Some(3));
        assert_eq!(summary.target_reached_day, Some(2));
        assert!((summary.final_exposure - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_no_payback_before_spend() {
        let result = SimulationResult::new(0.0, vec![sample(0, 0.0, 0.0, 0.0)]);
        let summary = result.summary();
        assert_eq!(summary.payback_day, None);
        assert_eq!(summary.target_reached_day, None);
    }

    #[test]
    fn test_day_lookup() {
        let result = SimulationResult::new(0.0, vec![sample(0, 0.0, 0.0, 0.0)]);
        assert!(result.day(0).is_some());
        assert!(result.day(1).is_none());
    }
}
