//! Growth-compounded revenue path
//!
//! Period `k` sees its seeded revenue grown `k` times: `seed[k] * (1 + g)^k`.
//! Computing the path up front keeps the per-period fold free of forward
//! mutation.

use crate::error::{ensure_finite, CashflowError, Result};

/// Validate a period-over-period growth rate
pub fn validate_growth(growth: f64) -> Result<()> {
    ensure_finite("growth", growth)?;
    if growth <= -1.0 {
        return Err(CashflowError::invalid("growth", format!("must be > -1, got {}", growth)));
    }
    Ok(())
}

/// Growth factor applied to period `k`
pub fn growth_factor(growth: f64, period: usize) -> f64 {
    (1.0 + growth).powi(period as i32)
}

/// Revenue per period after compounding `growth` once per elapsed period
pub fn compounded_revenue(seed: &[f64], growth: f64) -> Result<Vec<f64>> {
    validate_growth(growth)?;
    Ok(seed
        .iter()
        .enumerate()
        .map(|(k, &revenue)| revenue * growth_factor(growth, k))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_seed_compounds() {
        let path = compounded_revenue(&[1_000.0; 5], 0.1).unwrap();
        for (k, value) in path.iter().enumerate() {
            assert_relative_eq!(*value, 1_000.0 * 1.1_f64.powi(k as i32), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_matches_forward_slice_updates() {
        // Growing every later entry once per processed period gives the same path
        let seed = vec![500.0, 800.0, 650.0, 900.0, 1_200.0, 300.0];
        let growth = 0.035;

        let mut mutated = seed.clone();
        let mut observed = Vec::new();
        for i in 0..mutated.len() {
            observed.push(mutated[i]);
            for later in mutated.iter_mut().skip(i + 1) {
                *later *= 1.0 + growth;
            }
        }

        let path = compounded_revenue(&seed, growth).unwrap();
        for (a, b) in path.iter().zip(observed.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_growth_is_identity() {
        let seed = vec![1.0, 2.0, 3.0];
        assert_eq!(compounded_revenue(&seed, 0.0).unwrap(), seed);
    }

    #[test]
    fn test_invalid_growth_rejected() {
        assert!(compounded_revenue(&[1.0], -1.0).is_err());
        assert!(compounded_revenue(&[1.0], f64::INFINITY).is_err());
        assert!(compounded_revenue(&[1.0], -0.5).is_ok());
    }
}
