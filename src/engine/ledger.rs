//! Cumulative field economics.

use super::well::Milestone;
use crate::config::defaults::SCF_PER_GJ;
use crate::types::{CapitalCosts, SimulationError};

/// Running capital spend and gas revenue for one run.
///
/// Both totals only ever grow. Exposure is derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomicLedger {
    gas_price_aud: f64,
    costs: CapitalCosts,
    expense: f64,
    income: f64,
}

impl EconomicLedger {
    pub const fn new(gas_price_aud: f64, costs: CapitalCosts) -> Self {
        Self {
            gas_price_aud,
            costs,
            expense: 0.0,
            income: 0.0,
        }
    }

    pub const fn expense(&self) -> f64 {
        self.expense
    }

    pub const fn income(&self) -> f64 {
        self.income
    }

    pub fn exposure(&self) -> f64 {
        self.income - self.expense
    }

    /// Book the capital cost of one well milestone.
    pub fn charge(&mut self, milestone: Milestone) -> f64 {
        let cost = milestone.cost(&self.costs);
        self.expense += cost;
        cost
    }

    /// Daily revenue for a field sales rate (scf/day).
    pub fn revenue_for(&self, field_flow: f64) -> f64 {
        self.gas_price_aud * field_flow / SCF_PER_GJ
    }

    /// Book one day of production revenue.
    pub fn book_production(&mut self, field_flow: f64) -> f64 {
        let revenue = self.revenue_for(field_flow);
        self.income += revenue;
        revenue
    }

    /// Reject totals that have left the finite range.
    pub fn check_finite(&self, day: u64) -> Result<(), SimulationError> {
        for (quantity, value) in [("expense", self.expense), ("income", self.income)] {
            if !value.is_finite() {
                return Err(SimulationError::NonFinite {
                    quantity,
                    day,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> EconomicLedger {
        EconomicLedger::new(
            13.1,
            CapitalCosts {
                drill: 3.0e6,
                frac: 2.0e6,
                tie_in: 0.5e6,
            },
        )
    }

    #[test]
    fn test_charges_accumulate() {
        let mut l = ledger();
        l.charge(Milestone::DrillComplete);
        l.charge(Milestone::FracComplete);
        l.charge(Milestone::TieIn);
        assert!((l.expense() - 5.5e6).abs() < 1e-6);
        assert_eq!(l.income(), 0.0);
        assert!((l.exposure() + 5.5e6).abs() < 1e-6);
    }

    #[test]
    fn test_revenue_conversion() {
        let mut l = ledger();
        let revenue = l.book_production(947.8171);
        assert!((revenue - 13.1).abs() < 1e-9);
        assert!((l.income() - 13.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_flow_books_nothing() {
        let mut l = ledger();
        l.book_production(0.0);
        assert_eq!(l.income(), 0.0);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut l = ledger();
        l.book_production(f64::INFINITY);
        let err = l.check_finite(12).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::NonFinite { quantity: "income", day: 12, .. }
        ));
    }
}
