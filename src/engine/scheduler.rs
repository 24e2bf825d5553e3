//! Rig batch scheduling.
//!
//! One batch of `rigs` wells is spudded when the field is set up (day 0).
//! After that a new batch starts every `interval` days, counting only days
//! strictly greater than 1.

/// Field growth policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldScheduler {
    interval: u64,
    rigs: u64,
}

impl FieldScheduler {
    /// `interval` is the drilling duration and is never zero once
    /// parameters have been resolved.
    pub const fn new(interval: u64, rigs: u64) -> Self {
        Self { interval, rigs }
    }

    /// Wells created at field initialization.
    pub const fn initial_batch(&self) -> u64 {
        self.rigs
    }

    pub const fn batch_due(&self, day: u64) -> bool {
        day > 1 && day % self.interval == 0
    }

    /// Wells to create on `day` (0 when no batch is due).
    pub const fn wells_due(&self, day: u64) -> u64 {
        if self.batch_due(day) {
            self.rigs
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_on_interval_multiples() {
        let s = FieldScheduler::new(30, 2);
        let due: Vec<u64> = (0..=120).filter(|&d| s.batch_due(d)).collect();
        assert_eq!(due, vec![30, 60, 90, 120]);
        assert_eq!(s.wells_due(60), 2);
        assert_eq!(s.wells_due(61), 0);
    }

    #[test]
    fn test_day_zero_and_one_never_due() {
        let s = FieldScheduler::new(1, 3);
        assert!(!s.batch_due(0));
        assert!(!s.batch_due(1));
        assert!(s.batch_due(2));
        assert_eq!(s.initial_batch(), 3);
    }

    #[test]
    fn test_zero_rigs_creates_nothing() {
        let s = FieldScheduler::new(10, 0);
        assert!(s.batch_due(10));
        assert_eq!(s.wells_due(10), 0);
    }
}
