//! Creditor classes under the reorganization plan and their repayment schedules

pub mod amortization;
pub mod loader;
mod schedule;

pub use amortization::{discounted_principal, installments, payment, present_value, RATE_EPSILON};
pub use loader::{load_creditors, load_creditors_from_reader};
pub use schedule::{ClassPayment, MergeMode, ObligationSchedule};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_fraction, ensure_non_negative, CashflowError, Result};

/// One class of creditors with restructured terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorClass {
    /// Label used in reports (e.g. "Class I - Labor")
    #[serde(default)]
    pub name: String,

    /// Principal owed before the haircut
    pub total_claim: f64,

    /// Fraction of the claim forgiven (0-1)
    pub haircut: f64,

    /// Number of monthly installments
    pub installments: u32,

    /// Annual interest rate on the discounted principal (0 allowed)
    pub annual_rate: f64,
}

impl CreditorClass {
    pub fn new(
        name: impl Into<String>,
        total_claim: f64,
        haircut: f64,
        installments: u32,
        annual_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            total_claim,
            haircut,
            installments,
            annual_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let field = |f: &str| {
            if self.name.is_empty() {
                f.to_string()
            } else {
                format!("{}.{}", self.name, f)
            }
        };

        ensure_non_negative(&field("total_claim"), self.total_claim)?;
        ensure_fraction(&field("haircut"), self.haircut)?;
        ensure_non_negative(&field("annual_rate"), self.annual_rate)?;
        if self.installments == 0 {
            return Err(CashflowError::invalid(field("installments"), "must be a positive count"));
        }
        Ok(())
    }

    /// Claim after the haircut
    pub fn discounted_principal(&self) -> f64 {
        discounted_principal(self.total_claim, self.haircut)
    }

    /// Flat monthly installment for this class
    pub fn payment(&self) -> Result<f64> {
        self.validate()?;
        payment(self.total_claim, self.haircut, self.installments, self.annual_rate)
    }

    /// The class's installments as a sequence of equal values
    pub fn installments(&self) -> Result<impl Iterator<Item = f64>> {
        let value = self.payment()?;
        Ok(installments(value, self.installments))
    }
}

/// The four classes of the reference plan: 100,000 claim, 20% haircut,
/// 12 installments, 5% per year
pub fn reference_classes() -> Vec<CreditorClass> {
    (1..=4)
        .map(|class| CreditorClass::new(format!("Class {}", class), 100_000.0, 0.2, 12, 0.05))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_class_payment_matches_free_function() {
        let class = CreditorClass::new("Unsecured", 100_000.0, 0.2, 12, 0.05);
        let expected = payment(100_000.0, 0.2, 12, 0.05).unwrap();
        assert_eq!(class.payment().unwrap(), expected);
        assert_relative_eq!(class.discounted_principal(), 80_000.0);
    }

    #[test]
    fn test_class_installments_expand() {
        let class = CreditorClass::new("Labor", 12_000.0, 0.0, 6, 0.0);
        let values: Vec<f64> = class.installments().unwrap().collect();
        assert_eq!(values, vec![2_000.0; 6]);
    }

    #[test]
    fn test_validation_names_class() {
        let class = CreditorClass::new("Secured", 10_000.0, 0.2, 0, 0.05);
        let err = class.payment().unwrap_err();
        assert!(err.to_string().contains("Secured.installments"));
    }

    #[test]
    fn test_reference_classes() {
        let classes = reference_classes();
        assert_eq!(classes.len(), 4);
        assert!(classes.iter().all(|c| c.validate().is_ok()));
    }
}
