//! Cashback calculator
//!
//! Cashback = amount * percentage / 100

use super::validation::{validate_stake, CalcError};

/// Calculate the cashback returned on a settled amount
///
/// Both inputs must be strictly positive.
///
/// # Examples
/// ```
/// use matchbet::core::cashback::calculate_cashback;
/// let cashback = calculate_cashback(250.0, 10.0).unwrap();
/// assert!((cashback - 25.0).abs() < 1e-9);
/// ```
pub fn calculate_cashback(amount: f64, percentage: f64) -> Result<f64, CalcError> {
    validate_stake("amount", amount)?;
    validate_stake("percentage", percentage)?;

    Ok(amount * percentage / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cashback_basic() {
        let cashback = calculate_cashback(155.0, 10.0).unwrap();
        assert!((cashback - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_cashback_fractional_percentage() {
        let cashback = calculate_cashback(80.0, 2.5).unwrap();
        assert!((cashback - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cashback_rejects_non_positive() {
        assert!(calculate_cashback(0.0, 10.0).is_err());
        assert!(calculate_cashback(100.0, 0.0).is_err());
        assert!(calculate_cashback(-50.0, 10.0).is_err());
        assert!(calculate_cashback(100.0, -1.0).is_err());
    }

    #[test]
    fn test_cashback_rejects_non_finite() {
        assert_eq!(
            calculate_cashback(f64::NAN, 10.0),
            Err(CalcError::NonFiniteInput { field: "amount" })
        );
        assert!(calculate_cashback(100.0, f64::INFINITY).is_err());
    }
}
