//! Scenario configuration and runner
//!
//! A `ScenarioConfig` is built once per run and never mutated by the engine,
//! so independent runs (e.g. a growth sensitivity) can execute in parallel.

use std::path::Path;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::{AssumptionInputs, CostBasis, Granularity, PeriodAssumptions, Series};
use crate::creditors::{reference_classes, ClassPayment, CreditorClass, MergeMode, ObligationSchedule};
use crate::error::{ensure_finite, CashflowError, Result};
use crate::projection::valuation::npv_annual;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};

/// Installments are monthly; annual projections sum them per year
const INSTALLMENTS_PER_YEAR: usize = 12;

/// Everything needed for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub granularity: Granularity,

    /// Horizon in years; the projection covers `years * periods_per_year + 1` periods
    pub years: u32,

    /// Revenue growth per period
    pub growth: f64,

    pub cost_basis: CostBasis,
    pub inputs: AssumptionInputs,
    pub creditors: Vec<CreditorClass>,
    pub merge_mode: MergeMode,

    /// Effective annual rate for discounting the projected series
    pub discount_rate: Option<f64>,

    pub start_date: Option<NaiveDate>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl ScenarioConfig {
    /// Defaults of the reference plan: five years monthly, four creditor classes.
    ///
    /// The classes start paying together (`MergeMode::Concurrent`, schedule
    /// length = longest class). The reference screen instead repaid them back
    /// to back; select `MergeMode::Sequential` to reproduce that timeline.
    pub fn reference() -> Self {
        Self {
            granularity: Granularity::Monthly,
            years: 5,
            growth: 0.0,
            cost_basis: CostBasis::RateOfRevenue,
            inputs: AssumptionInputs {
                revenue: Series::Scalar(1_000_000.0),
                cost_rate: Series::Scalar(0.6),
                sales_tax_rate: Series::Scalar(0.1),
                investment: Series::Scalar(50_000.0),
                depreciation: Series::Scalar(10_000.0),
                tax: Series::Scalar(50_000.0),
                ..Default::default()
            },
            creditors: reference_classes(),
            merge_mode: MergeMode::Concurrent,
            discount_rate: None,
            start_date: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Number of simulated periods
    pub fn periods(&self) -> Result<usize> {
        self.granularity.periods_for_years(self.years)
    }

    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            growth: self.growth,
            cost_basis: self.cost_basis,
            granularity: self.granularity,
            start_date: self.start_date,
        }
    }

    /// Merged creditor schedule, expressed in projection periods
    pub fn obligation_schedule(&self) -> Result<ObligationSchedule> {
        let monthly = ObligationSchedule::build(&self.creditors, self.merge_mode)?;
        match self.granularity {
            Granularity::Monthly => Ok(monthly),
            Granularity::Annual => monthly.rebucket(INSTALLMENTS_PER_YEAR),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(rate) = self.discount_rate {
            ensure_finite("discount_rate", rate)?;
            if rate <= -1.0 {
                return Err(CashflowError::invalid("discount_rate", format!("must be > -1, got {}", rate)));
            }
        }
        self.projection_config().validate()
    }
}

/// Output of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub growth: f64,
    pub class_payments: Vec<ClassPayment>,
    pub obligations: ObligationSchedule,
    pub projection: ProjectionResult,
    pub summary: ProjectionSummary,
    pub npv: Option<f64>,
}

/// Runs scenarios, optionally against a pre-loaded set of period assumptions
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    /// Replaces the config's `inputs` when present (e.g. loaded from CSV)
    base_periods: Option<PeriodAssumptions>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self { base_periods: None }
    }

    pub fn with_periods(periods: PeriodAssumptions) -> Self {
        Self {
            base_periods: Some(periods),
        }
    }

    /// Period assumptions used for `config`
    pub fn assumptions_for(&self, config: &ScenarioConfig) -> Result<PeriodAssumptions> {
        match &self.base_periods {
            Some(periods) => Ok(periods.clone()),
            None => config.inputs.build(config.periods()?),
        }
    }

    /// Run a single scenario
    pub fn run(&self, config: &ScenarioConfig) -> Result<ScenarioOutcome> {
        config.validate()?;

        let assumptions = self.assumptions_for(config)?;
        let obligations = config.obligation_schedule()?;

        log::debug!(
            "running scenario: {} periods, growth={}, {} creditor classes",
            assumptions.len(),
            config.growth,
            config.creditors.len()
        );

        let engine = ProjectionEngine::new(config.projection_config());
        let projection = engine.project(&assumptions, &obligations)?;
        let summary = projection.summary();

        let npv = config.discount_rate.map(|rate| {
            npv_annual(rate, &projection.cash_flows(), config.granularity.periods_per_year())
        });

        Ok(ScenarioOutcome {
            growth: config.growth,
            class_payments: obligations.class_payments().to_vec(),
            obligations,
            projection,
            summary,
            npv,
        })
    }

    /// Run the same scenario for each growth rate, in parallel
    pub fn run_growth_sensitivity(
        &self,
        config: &ScenarioConfig,
        growth_rates: &[f64],
    ) -> Result<Vec<ScenarioOutcome>> {
        growth_rates
            .par_iter()
            .map(|&growth| {
                let scenario = ScenarioConfig {
                    growth,
                    ..config.clone()
                };
                self.run(&scenario)
            })
            .collect()
    }
}
