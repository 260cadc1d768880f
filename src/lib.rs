//! RJ Cashflow - cash flow projection for companies under judicial reorganization
//!
//! This library provides:
//! - Period assumptions (revenue, cost, taxes, investment, depreciation) as scalars or series
//! - Level-payment amortization of restructured creditor claims
//! - Merged obligation schedules across creditor classes
//! - A single-pass cash flow projection with compounding revenue growth
//! - Scenario configuration, growth sensitivity and discounting

pub mod error;
pub mod assumptions;
pub mod creditors;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{CashflowError, Result};
pub use assumptions::{AssumptionInputs, CostBasis, Granularity, PeriodAssumptions, PeriodInput, Series};
pub use creditors::{CreditorClass, MergeMode, ObligationSchedule};
pub use projection::{project, CashflowRow, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::{ScenarioConfig, ScenarioOutcome, ScenarioRunner};
