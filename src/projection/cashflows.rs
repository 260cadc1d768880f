//! Cash flow output structures for projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assumptions::Granularity;

/// A single row of projection output for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    // Timing
    pub period: usize,
    pub period_start: Option<NaiveDate>,

    // Income statement
    pub revenue: f64,
    pub cost: f64,
    pub expense: f64,
    pub operating_profit: f64,
    pub depreciation: f64,
    pub pre_tax_result: f64,
    pub sales_tax: f64,
    pub tax: f64,
    pub net_result: f64,

    // Cash
    pub operating_cash_flow: f64,
    pub investment: f64,
    pub obligation: f64,
    pub total_cash_flow: f64,
    pub cumulative_cash_flow: f64,
}

impl CashflowRow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub granularity: Granularity,

    /// One row per period, in chronological order
    pub rows: Vec<CashflowRow>,
}

impl ProjectionResult {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: CashflowRow) {
        self.rows.push(row);
    }

    /// Net cash flow per period
    pub fn cash_flows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_cash_flow).collect()
    }

    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.rows.iter().map(|r| r.revenue).sum();
        let total_obligations: f64 = self.rows.iter().map(|r| r.obligation).sum();
        let total_cash_flow: f64 = self.rows.iter().map(|r| r.total_cash_flow).sum();
        let negative_periods = self.rows.iter().filter(|r| r.total_cash_flow < 0.0).count();

        let final_cumulative_cash = self.rows.last().map(|r| r.cumulative_cash_flow).unwrap_or(0.0);

        let (min_cumulative_period, min_cumulative_cash) = self
            .rows
            .iter()
            .map(|r| (r.period, r.cumulative_cash_flow))
            .fold((0, f64::INFINITY), |acc, cur| if cur.1 < acc.1 { cur } else { acc });

        ProjectionSummary {
            periods: self.rows.len(),
            total_revenue,
            total_obligations,
            total_cash_flow,
            final_cumulative_cash,
            min_cumulative_cash: if self.rows.is_empty() { 0.0 } else { min_cumulative_cash },
            min_cumulative_period,
            negative_periods,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: usize,
    pub total_revenue: f64,
    pub total_obligations: f64,
    pub total_cash_flow: f64,
    pub final_cumulative_cash: f64,
    /// Lowest running cash balance and the period it occurs in
    pub min_cumulative_cash: f64,
    pub min_cumulative_period: usize,
    /// Periods whose own cash flow is negative
    pub negative_periods: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(period: usize, total: f64, cumulative: f64) -> CashflowRow {
        CashflowRow {
            total_cash_flow: total,
            cumulative_cash_flow: cumulative,
            obligation: 5.0,
            ..CashflowRow::new(period)
        }
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new(Granularity::Monthly);
        result.add_row(row(0, -100.0, -100.0));
        result.add_row(row(1, -50.0, -150.0));
        result.add_row(row(2, 400.0, 250.0));

        let summary = result.summary();
        assert_eq!(summary.periods, 3);
        assert_eq!(summary.total_cash_flow, 250.0);
        assert_eq!(summary.total_obligations, 15.0);
        assert_eq!(summary.final_cumulative_cash, 250.0);
        assert_eq!(summary.min_cumulative_cash, -150.0);
        assert_eq!(summary.min_cumulative_period, 1);
        assert_eq!(summary.negative_periods, 2);
        assert_eq!(result.cash_flows(), vec![-100.0, -50.0, 400.0]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProjectionResult::new(Granularity::Annual).summary();
        assert_eq!(summary.periods, 0);
        assert_eq!(summary.min_cumulative_cash, 0.0);
    }
}
