//! Level-payment amortization for restructured creditor claims
//!
//! Installments are always monthly: the annual rate is divided by 12
//! regardless of the projection's own period length.

use crate::error::{ensure_fraction, ensure_non_negative, CashflowError, Result};

/// Installments per year used to convert the annual rate
pub const INSTALLMENTS_PER_YEAR: f64 = 12.0;

/// Periodic rates at or below this are treated as zero (straight-line repayment)
pub const RATE_EPSILON: f64 = 1e-12;

/// Principal left after the haircut is applied
pub fn discounted_principal(principal: f64, haircut: f64) -> f64 {
    principal * (1.0 - haircut)
}

/// Flat installment that fully repays `principal * (1 - haircut)` over
/// `installments` monthly periods at `annual_rate / 12`.
///
/// Returned as a positive disbursement. A zero (or negligible) rate falls back
/// to `pv / installments`.
pub fn payment(principal: f64, haircut: f64, installments: u32, annual_rate: f64) -> Result<f64> {
    ensure_non_negative("total_claim", principal)?;
    ensure_fraction("haircut", haircut)?;
    ensure_non_negative("annual_rate", annual_rate)?;
    if installments == 0 {
        return Err(CashflowError::invalid("installments", "must be a positive count"));
    }

    let pv = discounted_principal(principal, haircut);
    let n = installments as f64;
    let rate = annual_rate / INSTALLMENTS_PER_YEAR;

    if rate <= RATE_EPSILON {
        return Ok(pv / n);
    }

    // 1 - (1+r)^-n without cancellation for small r
    let annuity_factor = -(-n * rate.ln_1p()).exp_m1();
    let value = pv * rate / annuity_factor;
    if !value.is_finite() {
        return Err(CashflowError::DivisionHazard {
            context: format!("annuity payment (rate={}, n={})", rate, installments),
        });
    }

    Ok(value)
}

/// Expand a flat payment into `installments` equal obligations
pub fn installments(payment: f64, installments: u32) -> impl Iterator<Item = f64> {
    std::iter::repeat(payment).take(installments as usize)
}

/// Present value of `n` level payments discounted at a periodic rate
pub fn present_value(payment: f64, periodic_rate: f64, n: u32) -> f64 {
    (1..=n)
        .map(|t| payment / (1.0 + periodic_rate).powi(t as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_is_straight_line() {
        let p = payment(120_000.0, 0.0, 12, 0.0).unwrap();
        assert_eq!(p, 10_000.0);
        assert!(p.is_finite());

        let total: f64 = installments(p, 12).sum();
        assert_relative_eq!(total, 120_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_negligible_rate_routes_to_straight_line() {
        let p = payment(1_000.0, 0.0, 4, 1e-15).unwrap();
        assert_eq!(p, 250.0);
    }

    #[test]
    fn test_payment_reconstructs_discounted_principal() {
        let p = payment(100_000.0, 0.2, 12, 0.05).unwrap();
        let pv = present_value(p, 0.05 / 12.0, 12);
        assert_relative_eq!(pv, 80_000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_rate_just_above_cutoff_reconstructs_principal() {
        for multiple in [2.0, 5.0, 24.0, 1_000.0] {
            let annual_rate = RATE_EPSILON * multiple * INSTALLMENTS_PER_YEAR;
            let p = payment(1_000_000.0, 0.0, 12, annual_rate).unwrap();
            let pv = present_value(p, annual_rate / INSTALLMENTS_PER_YEAR, 12);
            assert_relative_eq!(pv, 1_000_000.0, max_relative = 1e-6);
            assert_relative_eq!(p, 1_000_000.0 / 12.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_reference_payment_value() {
        let p = payment(100_000.0, 0.2, 12, 0.05).unwrap();
        assert_abs_diff_eq!(p, 6_848.5985, epsilon = 1e-3);
    }

    #[test]
    fn test_full_haircut_pays_nothing() {
        assert_eq!(payment(50_000.0, 1.0, 24, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(payment(1_000.0, 0.2, 0, 0.05).is_err());
        assert!(payment(1_000.0, -0.1, 12, 0.05).is_err());
        assert!(payment(1_000.0, 0.2, 12, -0.01).is_err());
        assert!(payment(-1.0, 0.2, 12, 0.05).is_err());
        assert!(payment(f64::NAN, 0.2, 12, 0.05).is_err());
    }

    #[test]
    fn test_installments_length() {
        let values: Vec<f64> = installments(42.0, 5).collect();
        assert_eq!(values, vec![42.0; 5]);
    }
}
