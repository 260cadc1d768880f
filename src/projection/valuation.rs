//! Discounting helpers for projected cash flow series
//!
//! Period 0 is undiscounted; period `t` is discounted `t` times at the
//! periodic rate.

const IRR_TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Convert an effective annual rate to the equivalent rate per period
pub fn periodic_rate(annual_rate: f64, periods_per_year: u32) -> f64 {
    if periods_per_year <= 1 {
        return annual_rate;
    }
    (1.0 + annual_rate).powf(1.0 / periods_per_year as f64) - 1.0
}

/// Net present value at a periodic rate
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Net present value at an effective annual rate
pub fn npv_annual(annual_rate: f64, cash_flows: &[f64], periods_per_year: u32) -> f64 {
    npv(periodic_rate(annual_rate, periods_per_year), cash_flows)
}

/// Annualized internal rate of return of a cash flow series.
///
/// Newton-Raphson on the periodic rate, falling back to bisection.
/// `None` when the series never changes sign or no root is found.
pub fn irr(cash_flows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cash_flows.is_empty() {
        return None;
    }

    let has_positive = cash_flows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cash_flows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let annualize = |rate: f64| (1.0 + rate).powi(periods_per_year.max(1) as i32) - 1.0;

    let mut rate = 0.01;
    for _ in 0..MAX_ITERATIONS {
        let (value, derivative) = npv_and_derivative(cash_flows, rate);
        if derivative.abs() < 1e-20 {
            break;
        }

        let next = (rate - value / derivative).clamp(-0.99, 10.0);
        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(annualize(next));
        }
        rate = next;
    }

    irr_bisection(cash_flows).map(annualize)
}

fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            derivative -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (value, derivative)
}

fn irr_bisection(cash_flows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let mut npv_low = npv(low, cash_flows);

    if npv_low * npv(high, cash_flows) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(mid, cash_flows);

        if npv_mid.abs() < IRR_TOLERANCE || (high - low) / 2.0 < IRR_TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_zero_rate_is_sum() {
        assert_eq!(npv(0.0, &[100.0, -20.0, 30.0]), 110.0);
    }

    #[test]
    fn test_npv_discounts_later_periods() {
        let value = npv(0.1, &[0.0, 110.0, 121.0]);
        assert_relative_eq!(value, 200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_periodic_rate_round_trip() {
        let monthly = periodic_rate(0.12, 12);
        assert_relative_eq!((1.0 + monthly).powi(12) - 1.0, 0.12, max_relative = 1e-12);
        assert_eq!(periodic_rate(0.12, 1), 0.12);
    }

    #[test]
    fn test_simple_irr() {
        // Outflow of 1000 returning 1100 after twelve months
        let mut cash_flows = vec![-1000.0];
        cash_flows.extend(vec![0.0; 11]);
        cash_flows.push(1100.0);

        let rate = irr(&cash_flows, 12).unwrap();
        assert!((rate - 0.10).abs() < 0.001, "expected ~10% IRR, got {}", rate);
    }

    #[test]
    fn test_irr_requires_sign_change() {
        assert_eq!(irr(&[100.0, 200.0], 1), None);
        assert_eq!(irr(&[], 12), None);
    }
}
