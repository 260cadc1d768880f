//! Running state carried between periods of a projection

use chrono::{Months, NaiveDate};

use crate::assumptions::Granularity;

/// Accumulators updated once per processed period
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Index of the period being processed (0-based)
    pub period: usize,

    /// Cash generated from period 0 through the current period
    pub cumulative_cash: f64,

    start_date: Option<NaiveDate>,
    months_per_period: u32,
}

impl ProjectionState {
    pub fn new(start_date: Option<NaiveDate>, granularity: Granularity) -> Self {
        Self {
            period: 0,
            cumulative_cash: 0.0,
            start_date,
            months_per_period: 12 / granularity.periods_per_year(),
        }
    }

    /// First day of the current period, when the run is anchored to a date
    pub fn period_start(&self) -> Option<NaiveDate> {
        let months = self.months_per_period.checked_mul(self.period as u32)?;
        self.start_date?.checked_add_months(Months::new(months))
    }

    /// Record the period's cash flow and move to the next period
    pub fn close_period(&mut self, total_cash_flow: f64) -> f64 {
        self.cumulative_cash += total_cash_flow;
        self.period += 1;
        self.cumulative_cash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_start_monthly() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut state = ProjectionState::new(Some(start), Granularity::Monthly);
        state.close_period(1.0);

        // Month-end dates clamp to the last valid day
        assert_eq!(state.period_start(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_period_start_annual() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut state = ProjectionState::new(Some(start), Granularity::Annual);
        state.close_period(1.0);
        state.close_period(1.0);
        assert_eq!(state.period_start(), NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn test_cumulative_cash() {
        let mut state = ProjectionState::new(None, Granularity::Monthly);
        assert_eq!(state.close_period(100.0), 100.0);
        assert_eq!(state.close_period(-40.0), 60.0);
        assert_eq!(state.period, 2);
        assert_eq!(state.period_start(), None);
    }
}
