//! Merged, period-indexed obligation schedule across creditor classes

use serde::{Deserialize, Serialize};

use super::CreditorClass;
use crate::error::{CashflowError, Result};

/// How the installments of several classes line up on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Every class starts paying at period 0; amounts due in the same period are summed
    #[default]
    Concurrent,
    /// Classes are repaid one after another, in declaration order
    Sequential,
}

/// Flat payment computed for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPayment {
    pub name: String,
    pub payment: f64,
    pub installments: u32,
}

impl ClassPayment {
    pub fn total(&self) -> f64 {
        self.payment * self.installments as f64
    }
}

/// Payment owed per period since the start of the plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObligationSchedule {
    values: Vec<f64>,
    classes: Vec<ClassPayment>,
}

impl ObligationSchedule {
    /// Schedule with no obligations
    pub fn empty() -> Self {
        Self::default()
    }

    /// Schedule from raw per-period values (no class breakdown)
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values,
            classes: Vec::new(),
        }
    }

    /// Compute each class's payment and merge the installments into one timeline
    pub fn build(classes: &[CreditorClass], mode: MergeMode) -> Result<Self> {
        let mut payments = Vec::with_capacity(classes.len());
        for class in classes {
            payments.push(ClassPayment {
                name: class.name.clone(),
                payment: class.payment()?,
                installments: class.installments,
            });
        }

        let values = match mode {
            MergeMode::Concurrent => {
                let len = payments.iter().map(|p| p.installments as usize).max().unwrap_or(0);
                let mut values = vec![0.0; len];
                for p in &payments {
                    for slot in values.iter_mut().take(p.installments as usize) {
                        *slot += p.payment;
                    }
                }
                values
            }
            MergeMode::Sequential => payments
                .iter()
                .flat_map(|p| super::installments(p.payment, p.installments))
                .collect(),
        };

        log::debug!(
            "obligation schedule: {} classes, {} periods, mode {:?}",
            payments.len(),
            values.len(),
            mode
        );

        Ok(Self {
            values,
            classes: payments,
        })
    }

    /// Amount due at `period`; zero beyond the end of the schedule
    pub fn value_at(&self, period: usize) -> f64 {
        self.values.get(period).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn class_payments(&self) -> &[ClassPayment] {
        &self.classes
    }

    /// Sum consecutive installments into buckets, e.g. 12 monthly values per year
    pub fn rebucket(&self, periods_per_bucket: usize) -> Result<Self> {
        if periods_per_bucket == 0 {
            return Err(CashflowError::invalid("periods_per_bucket", "must be a positive count"));
        }

        let values = self
            .values
            .chunks(periods_per_bucket)
            .map(|chunk| chunk.iter().sum())
            .collect();

        Ok(Self {
            values,
            classes: self.classes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn classes() -> Vec<CreditorClass> {
        vec![
            CreditorClass::new("Labor", 1_200.0, 0.0, 12, 0.0),
            CreditorClass::new("Suppliers", 600.0, 0.0, 6, 0.0),
        ]
    }

    #[test]
    fn test_concurrent_merge() {
        let schedule = ObligationSchedule::build(&classes(), MergeMode::Concurrent).unwrap();

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule.value_at(0), 200.0);
        assert_eq!(schedule.value_at(5), 200.0);
        assert_eq!(schedule.value_at(6), 100.0);
        assert_eq!(schedule.value_at(11), 100.0);
        assert_eq!(schedule.value_at(12), 0.0);
        assert_relative_eq!(schedule.total(), 1_800.0);
    }

    #[test]
    fn test_sequential_merge() {
        let schedule = ObligationSchedule::build(&classes(), MergeMode::Sequential).unwrap();

        assert_eq!(schedule.len(), 18);
        assert_eq!(schedule.value_at(11), 100.0);
        assert_eq!(schedule.value_at(12), 100.0);
        assert_eq!(schedule.value_at(17), 100.0);
        assert_eq!(schedule.value_at(18), 0.0);
        assert_relative_eq!(schedule.total(), 1_800.0);
    }

    #[test]
    fn test_single_reference_class() {
        let class = CreditorClass::new("Class 1", 100_000.0, 0.2, 12, 0.05);
        let schedule = ObligationSchedule::build(&[class.clone()], MergeMode::Concurrent).unwrap();
        let expected = class.payment().unwrap();

        assert_eq!(schedule.len(), 12);
        assert!(schedule.as_slice().iter().all(|&v| v == expected));
        assert_eq!(schedule.class_payments()[0].payment, expected);
    }

    #[test]
    fn test_rebucket_to_annual() {
        let schedule = ObligationSchedule::from_values(vec![10.0; 18]);
        let annual = schedule.rebucket(12).unwrap();

        assert_eq!(annual.as_slice(), &[120.0, 60.0]);
        assert!(schedule.rebucket(0).is_err());
    }

    #[test]
    fn test_invalid_class_rejects_whole_schedule() {
        let mut bad = classes();
        bad[1].haircut = 1.5;
        assert!(ObligationSchedule::build(&bad, MergeMode::Concurrent).is_err());
    }

    #[test]
    fn test_no_classes_is_empty() {
        let schedule = ObligationSchedule::build(&[], MergeMode::Concurrent).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.value_at(0), 0.0);
    }
}
