//! Exponential decline curve.
//!
//! `q(t) = qi · e^(−d·t)` with `d = ln(10) / t10`, so that a well is at 10 %
//! of its peak rate after `t10` producing days.

use std::f64::consts::LN_10;

/// Instantaneous rate after `elapsed_days` of production.
///
/// Callers only pass `elapsed_days >= 0`; wells still under construction
/// report zero flow without consulting the curve.
pub fn flow(peak_rate: f64, decline_constant: f64, elapsed_days: f64) -> f64 {
    peak_rate * (-decline_constant * elapsed_days).exp()
}

/// Decline constant (1/day) for a well reaching 10 % of peak after
/// `days_to_ten_percent` producing days.
pub fn decline_constant(days_to_ten_percent: f64) -> f64 {
    LN_10 / days_to_ten_percent
}

/// Decline parameters shared by every well in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclineCurve {
    pub peak_rate: f64,
    pub decline_constant: f64,
}

impl DeclineCurve {
    pub const fn new(peak_rate: f64, decline_constant: f64) -> Self {
        Self {
            peak_rate,
            decline_constant,
        }
    }

    /// Rate after a whole number of producing days.
    #[allow(clippy::cast_precision_loss)]
    pub fn rate_after(&self, producing_days: u64) -> f64 {
        flow(self.peak_rate, self.decline_constant, producing_days as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_decline_holds_peak() {
        for t in [0.0, 1.0, 365.0, 1.0e6] {
            assert_eq!(flow(1.0e6, 0.0, t), 1.0e6);
        }
    }

    #[test]
    fn test_zero_elapsed_is_peak() {
        assert_eq!(flow(42.0, 0.3, 0.0), 42.0);
    }

    #[test]
    fn test_strictly_decreasing() {
        let d = decline_constant(1460.0);
        let mut prev = flow(1.0e6, d, 0.0);
        for t in 1..2000 {
            let q = flow(1.0e6, d, f64::from(t));
            assert!(q < prev, "not decreasing at t={t}");
            assert!(q > 0.0);
            prev = q;
        }
    }

    #[test]
    fn test_ten_percent_at_decline_time() {
        let t10 = 4.0 * 365.0;
        let q = flow(1.0e6, decline_constant(t10), t10);
        assert!((q - 1.0e5).abs() < 1e-6, "got {q}");
    }

    #[test]
    fn test_curve_rate_after_matches_flow() {
        let curve = DeclineCurve::new(5.0e5, decline_constant(730.0));
        assert_eq!(curve.rate_after(100), flow(5.0e5, curve.decline_constant, 100.0));
    }
}
