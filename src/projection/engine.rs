//! Core projection engine for period-by-period cash flow projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cashflows::{CashflowRow, ProjectionResult};
use super::growth::{compounded_revenue, validate_growth};
use super::state::ProjectionState;
use crate::assumptions::{CostBasis, Granularity, PeriodAssumptions, PeriodInput};
use crate::creditors::ObligationSchedule;
use crate::error::{ensure_non_negative, Result};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Revenue growth per period (fraction, > -1)
    pub growth: f64,

    /// Whether cost comes from `cost_rate` or the absolute `cost` line
    pub cost_basis: CostBasis,

    /// Period length; only affects dating of rows and reporting
    pub granularity: Granularity,

    /// Anchor date for period 0
    pub start_date: Option<NaiveDate>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            growth: 0.0,
            cost_basis: CostBasis::RateOfRevenue,
            granularity: Granularity::Monthly,
            start_date: None,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        validate_growth(self.growth)
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project every period of `assumptions`, deducting `obligations` by period index.
    ///
    /// All inputs are checked before the first period is processed; a rejected
    /// run produces no rows.
    pub fn project(
        &self,
        assumptions: &PeriodAssumptions,
        obligations: &ObligationSchedule,
    ) -> Result<ProjectionResult> {
        self.config.validate()?;
        for (i, &value) in obligations.as_slice().iter().enumerate() {
            ensure_non_negative(&format!("obligation[{}]", i), value)?;
        }
        if obligations.len() > assumptions.len() {
            log::warn!(
                "obligation schedule runs {} periods past the projection horizon",
                obligations.len() - assumptions.len()
            );
        }

        let revenue = compounded_revenue(&assumptions.revenue_seed(), self.config.growth)?;

        log::debug!(
            "projecting {} periods (growth={}, cost basis {:?}, {} obligation periods)",
            assumptions.len(),
            self.config.growth,
            self.config.cost_basis,
            obligations.len()
        );

        let mut result = ProjectionResult::new(self.config.granularity);
        let mut state = ProjectionState::new(self.config.start_date, self.config.granularity);

        for (input, &period_revenue) in assumptions.iter().zip(revenue.iter()) {
            let obligation = obligations.value_at(state.period);
            let row = self.calculate_period(input, period_revenue, obligation, &mut state);
            result.add_row(row);
        }

        Ok(result)
    }

    /// Derive one period's income statement and cash flow
    fn calculate_period(
        &self,
        input: &PeriodInput,
        revenue: f64,
        obligation: f64,
        state: &mut ProjectionState,
    ) -> CashflowRow {
        let mut row = CashflowRow::new(state.period);
        row.period_start = state.period_start();

        row.revenue = revenue;
        row.cost = match self.config.cost_basis {
            CostBasis::RateOfRevenue => revenue * input.cost_rate,
            CostBasis::Absolute => input.cost,
        };
        row.expense = input.expense;
        row.operating_profit = row.revenue - row.cost - row.expense;

        row.depreciation = input.depreciation;
        row.pre_tax_result = row.operating_profit - row.depreciation;

        row.sales_tax = revenue * input.sales_tax_rate;
        row.tax = input.tax;
        row.net_result = row.pre_tax_result - row.sales_tax - row.tax;

        // Depreciation is non-cash
        row.operating_cash_flow = row.net_result + row.depreciation;

        row.investment = input.investment;
        row.obligation = obligation;
        row.total_cash_flow = row.operating_cash_flow - row.investment - row.obligation;

        log::trace!(
            "period {}: revenue={:.2} net={:.2} total={:.2}",
            row.period,
            row.revenue,
            row.net_result,
            row.total_cash_flow
        );

        row.cumulative_cash_flow = state.close_period(row.total_cash_flow);
        row
    }
}

/// Project net cash flow per period with cost taken as a share of revenue
pub fn project(
    assumptions: &PeriodAssumptions,
    growth: f64,
    obligations: &ObligationSchedule,
) -> Result<Vec<f64>> {
    let config = ProjectionConfig {
        growth,
        ..Default::default()
    };
    let result = ProjectionEngine::new(config).project(assumptions, obligations)?;
    Ok(result.cash_flows())
}
