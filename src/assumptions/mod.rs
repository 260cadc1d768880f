//! Period-level operating assumptions: revenue, cost, tax, investment and depreciation
//!
//! Inputs arrive either as scalars broadcast across the horizon or as explicit
//! per-period series. Both are validated here so the projection loop can assume
//! same-length, finite, in-range values.

pub mod loader;

pub use loader::{load_periods, load_periods_from_reader};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_fraction, ensure_non_negative, CashflowError, Result};

/// Length of one simulation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Monthly,
    Annual,
}

impl Granularity {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Granularity::Monthly => 12,
            Granularity::Annual => 1,
        }
    }

    /// Number of simulated periods for a horizon in years (period 0 included)
    pub fn periods_for_years(self, years: u32) -> Result<usize> {
        years
            .checked_mul(self.periods_per_year())
            .and_then(|periods| (periods as usize).checked_add(1))
            .ok_or_else(|| CashflowError::invalid("years", format!("horizon of {} years is too long", years)))
    }
}

/// How the cost line of each period is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBasis {
    /// cost = revenue * cost_rate
    #[default]
    RateOfRevenue,
    /// cost = the absolute `cost` value of the period
    Absolute,
}

/// A value that is either constant over the horizon or given per period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Scalar(f64),
    PerPeriod(Vec<f64>),
}

impl Default for Series {
    fn default() -> Self {
        Series::Scalar(0.0)
    }
}

impl From<f64> for Series {
    fn from(value: f64) -> Self {
        Series::Scalar(value)
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::PerPeriod(values)
    }
}

impl Series {
    /// Only the first period carries the value, the rest are zero
    pub fn initial_only(value: f64, periods: usize) -> Self {
        let mut values = vec![0.0; periods];
        if let Some(first) = values.first_mut() {
            *first = value;
        }
        Series::PerPeriod(values)
    }

    /// Expand to exactly `periods` values
    pub fn resolve(&self, field: &str, periods: usize) -> Result<Vec<f64>> {
        match self {
            Series::Scalar(v) => Ok(vec![*v; periods]),
            Series::PerPeriod(values) => {
                if values.len() != periods {
                    return Err(CashflowError::LengthMismatch {
                        field: field.to_string(),
                        expected: periods,
                        actual: values.len(),
                    });
                }
                Ok(values.clone())
            }
        }
    }
}

/// Raw assumption inputs before expansion to the horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionInputs {
    pub revenue: Series,
    /// Cost as a fraction of revenue (used with `CostBasis::RateOfRevenue`)
    pub cost_rate: Series,
    /// Absolute cost per period (used with `CostBasis::Absolute`)
    pub cost: Series,
    /// Operating expense deducted alongside cost
    pub expense: Series,
    /// Sales tax as a fraction of revenue
    pub sales_tax_rate: Series,
    /// Flat tax amount per period, independent of `sales_tax_rate`
    pub tax: Series,
    pub investment: Series,
    pub depreciation: Series,
}

impl AssumptionInputs {
    /// Expand every line to `periods` values and validate the result
    pub fn build(&self, periods: usize) -> Result<PeriodAssumptions> {
        if periods == 0 {
            return Err(CashflowError::invalid("periods", "horizon must contain at least one period"));
        }

        let revenue = self.revenue.resolve("revenue", periods)?;
        let cost_rate = self.cost_rate.resolve("cost_rate", periods)?;
        let cost = self.cost.resolve("cost", periods)?;
        let expense = self.expense.resolve("expense", periods)?;
        let sales_tax_rate = self.sales_tax_rate.resolve("sales_tax_rate", periods)?;
        let tax = self.tax.resolve("tax", periods)?;
        let investment = self.investment.resolve("investment", periods)?;
        let depreciation = self.depreciation.resolve("depreciation", periods)?;

        let rows = (0..periods)
            .map(|i| PeriodInput {
                revenue: revenue[i],
                cost_rate: cost_rate[i],
                cost: cost[i],
                expense: expense[i],
                sales_tax_rate: sales_tax_rate[i],
                tax: tax[i],
                investment: investment[i],
                depreciation: depreciation[i],
            })
            .collect();

        PeriodAssumptions::new(rows)
    }
}

/// Assumptions for a single period, before growth is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodInput {
    pub revenue: f64,
    pub cost_rate: f64,
    pub cost: f64,
    pub expense: f64,
    pub sales_tax_rate: f64,
    pub tax: f64,
    pub investment: f64,
    pub depreciation: f64,
}

impl PeriodInput {
    fn validate(&self, period: usize) -> Result<()> {
        let field = |name: &str| format!("{}[{}]", name, period);

        ensure_non_negative(&field("revenue"), self.revenue)?;
        ensure_fraction(&field("cost_rate"), self.cost_rate)?;
        ensure_non_negative(&field("cost"), self.cost)?;
        ensure_non_negative(&field("expense"), self.expense)?;
        ensure_fraction(&field("sales_tax_rate"), self.sales_tax_rate)?;
        ensure_non_negative(&field("tax"), self.tax)?;
        ensure_non_negative(&field("investment"), self.investment)?;
        ensure_non_negative(&field("depreciation"), self.depreciation)?;
        Ok(())
    }
}

/// Validated, ordered per-period assumptions (index 0 = first simulated period)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAssumptions {
    periods: Vec<PeriodInput>,
}

impl PeriodAssumptions {
    pub fn new(periods: Vec<PeriodInput>) -> Result<Self> {
        if periods.is_empty() {
            return Err(CashflowError::invalid("periods", "horizon must contain at least one period"));
        }
        for (i, p) in periods.iter().enumerate() {
            p.validate(i)?;
        }
        Ok(Self { periods })
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, period: usize) -> Option<&PeriodInput> {
        self.periods.get(period)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodInput> {
        self.periods.iter()
    }

    pub fn as_slice(&self) -> &[PeriodInput] {
        &self.periods
    }

    /// Seeded revenue per period, before any growth
    pub fn revenue_seed(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.revenue).collect()
    }
}
