//! Input guards shared by the calculators
//!
//! Every failure here is a normal, recoverable state: callers recompute on
//! each edit, so a half-typed value simply yields no result.

use thiserror::Error;

/// Reasons a calculation is unavailable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A required field is empty or was never provided
    #[error("{field} is required")]
    IncompleteInput { field: &'static str },

    /// A field could not be parsed as a number
    #[error("{field} is not a number: {value:?}")]
    NonNumericInput { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },

    /// Odds at or below 1, or a stake at or below zero
    #[error("{field} must be greater than {min}, got {value}")]
    NonPositiveStakeOrOdd {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("Commission must be within [0, 100), got {0}")]
    CommissionOutOfRange(f64),

    #[error("Risk allocation must be between 0 and 100, got {0}")]
    RiskOutOfRange(u8),

    /// `lay_odd - commission` is not positive, so no lay stake exists
    #[error("Lay odd {lay_odd} leaves no margin over commission {commission}")]
    DegenerateOdds { lay_odd: f64, commission: f64 },

    #[error("Lay stake must be non-negative, got {0}")]
    NegativeLayStake(f64),

    #[error("No capital at risk")]
    NoCapitalAtRisk,

    #[error("Sweep step must be between 1 and 100, got {0}")]
    InvalidSweepStep(u8),

    #[error("Ledger value must be a positive amount, got {0}")]
    InvalidLedgerValue(f64),
}

fn require_finite(field: &'static str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() {
        return Err(CalcError::NonFiniteInput { field });
    }
    Ok(())
}

/// Decimal odds must exceed 1.0
pub fn validate_odd(field: &'static str, odd: f64) -> Result<(), CalcError> {
    require_finite(field, odd)?;
    if odd <= 1.0 {
        return Err(CalcError::NonPositiveStakeOrOdd {
            field,
            value: odd,
            min: 1.0,
        });
    }
    Ok(())
}

/// Stakes and amounts must be strictly positive
pub fn validate_stake(field: &'static str, stake: f64) -> Result<(), CalcError> {
    require_finite(field, stake)?;
    if stake <= 0.0 {
        return Err(CalcError::NonPositiveStakeOrOdd {
            field,
            value: stake,
            min: 0.0,
        });
    }
    Ok(())
}

pub fn validate_commission(commission_percent: f64) -> Result<(), CalcError> {
    require_finite("commission_percent", commission_percent)?;
    if !(0.0..100.0).contains(&commission_percent) {
        return Err(CalcError::CommissionOutOfRange(commission_percent));
    }
    Ok(())
}

pub fn validate_risk_allocation(risk_allocation: u8) -> Result<(), CalcError> {
    if risk_allocation > 100 {
        return Err(CalcError::RiskOutOfRange(risk_allocation));
    }
    Ok(())
}

/// A manually entered lay stake may be zero but never negative
pub fn validate_lay_stake(lay_stake: f64) -> Result<(), CalcError> {
    require_finite("lay_stake", lay_stake)?;
    if lay_stake < 0.0 {
        return Err(CalcError::NegativeLayStake(lay_stake));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_odd_valid() {
        assert!(validate_odd("back_odd", 1.01).is_ok());
        assert!(validate_odd("back_odd", 2.0).is_ok());
        assert!(validate_odd("back_odd", 1000.0).is_ok());
    }

    #[test]
    fn test_validate_odd_invalid() {
        assert!(validate_odd("back_odd", 1.0).is_err());
        assert!(validate_odd("back_odd", 0.5).is_err());
        assert!(validate_odd("back_odd", -2.0).is_err());
        assert_eq!(
            validate_odd("lay_odd", f64::NAN),
            Err(CalcError::NonFiniteInput { field: "lay_odd" })
        );
    }

    #[test]
    fn test_validate_stake() {
        assert!(validate_stake("back_stake", 0.01).is_ok());
        assert!(validate_stake("back_stake", 0.0).is_err());
        assert!(validate_stake("back_stake", -10.0).is_err());
        assert!(validate_stake("back_stake", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_commission() {
        assert!(validate_commission(0.0).is_ok());
        assert!(validate_commission(6.5).is_ok());
        assert!(validate_commission(99.9).is_ok());
        assert_eq!(
            validate_commission(100.0),
            Err(CalcError::CommissionOutOfRange(100.0))
        );
        assert!(validate_commission(-0.1).is_err());
    }

    #[test]
    fn test_validate_risk_allocation() {
        for risk in [0, 50, 100] {
            assert!(validate_risk_allocation(risk).is_ok());
        }
        assert_eq!(
            validate_risk_allocation(101),
            Err(CalcError::RiskOutOfRange(101))
        );
    }

    #[test]
    fn test_validate_lay_stake() {
        assert!(validate_lay_stake(0.0).is_ok());
        assert!(validate_lay_stake(97.5).is_ok());
        assert_eq!(
            validate_lay_stake(-1.0),
            Err(CalcError::NegativeLayStake(-1.0))
        );
    }

    #[test]
    fn test_error_display() {
        let err = CalcError::IncompleteInput { field: "back_odd" };
        assert!(err.to_string().contains("back_odd is required"));

        let err = CalcError::CommissionOutOfRange(100.0);
        assert!(err.to_string().contains("Commission"));
    }
}
