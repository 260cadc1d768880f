//! Cash flow projection over the simulated periods

mod cashflows;
mod engine;
pub mod growth;
mod state;
pub mod valuation;

pub use cashflows::{CashflowRow, ProjectionResult, ProjectionSummary};
pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use growth::compounded_revenue;
pub use state::ProjectionState;
pub use valuation::{irr, npv, npv_annual};
