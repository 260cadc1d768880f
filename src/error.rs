//! Error types shared by the projection library

use thiserror::Error;

/// Errors raised while validating inputs or loading scenario files
#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("length mismatch for `{field}`: expected {expected} periods, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite result in {context}")]
    DivisionHazard { context: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CashflowError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CashflowError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CashflowError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CashflowError::invalid(field, format!("must be finite, got {}", value)))
    }
}

/// Reject negative (or non-finite) amounts
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CashflowError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

/// Reject fractions outside [0, 1]
pub(crate) fn ensure_fraction(field: &str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(CashflowError::invalid(field, format!("must be within [0, 1], got {}", value)));
    }
    Ok(())
}
