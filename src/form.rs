//! Text form layer for the calculators
//!
//! Holds fields exactly as typed and turns them into validated inputs. A
//! blank field is `IncompleteInput`, unparsable text is `NonNumericInput`;
//! `evaluate` folds every failure into `None`.

use tracing::debug;

use crate::config::CalculatorDefaults;
use crate::core::cashback::calculate_cashback;
use crate::core::matched::{
    compute_optimal_lay_stake, resolve, MatchedBetInput, MatchedBetResult, NEUTRAL_RISK_ALLOCATION,
};
use crate::core::validation::CalcError;

/// Parse one numeric text field
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, CalcError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::IncompleteInput { field });
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| CalcError::NonNumericInput {
            field,
            value: trimmed.to_string(),
        })
}

/// Round a monetary amount to cents, as shown in the lay stake field
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Matched bet calculator form
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedBetForm {
    pub back_odd: String,
    pub back_stake: String,
    pub is_freebet: bool,
    pub lay_odd: String,
    pub commission: String,
    /// Optional; blank means "use the optimizer"
    pub lay_stake: String,
    pub risk_allocation: u8,
}

impl Default for MatchedBetForm {
    fn default() -> Self {
        Self {
            back_odd: String::new(),
            back_stake: String::new(),
            is_freebet: false,
            lay_odd: String::new(),
            commission: String::new(),
            lay_stake: String::new(),
            risk_allocation: NEUTRAL_RISK_ALLOCATION,
        }
    }
}

impl MatchedBetForm {
    /// Empty form with commission and risk prefilled
    pub fn with_defaults(defaults: &CalculatorDefaults) -> Self {
        Self {
            commission: defaults.commission_percent.to_string(),
            risk_allocation: defaults.risk_allocation,
            ..Self::default()
        }
    }

    pub fn parse(&self) -> Result<MatchedBetInput, CalcError> {
        let back_odd = parse_number("back_odd", &self.back_odd)?;
        let back_stake = parse_number("back_stake", &self.back_stake)?;
        let lay_odd = parse_number("lay_odd", &self.lay_odd)?;
        let commission_percent = parse_number("commission", &self.commission)?;

        let mut input = MatchedBetInput::new(back_odd, back_stake, lay_odd, commission_percent)
            .freebet(self.is_freebet)
            .with_risk_allocation(self.risk_allocation);

        if !self.lay_stake.trim().is_empty() {
            input = input.with_lay_stake(parse_number("lay_stake", &self.lay_stake)?);
        }

        Ok(input)
    }

    /// Lay stake the optimizer proposes for the current fields, in cents
    pub fn suggest_lay_stake(&self) -> Option<f64> {
        let input = self.parse().ok()?;
        compute_optimal_lay_stake(
            input.back_odd,
            input.back_stake,
            input.lay_odd,
            input.commission_percent,
            input.is_freebet,
            input.risk_allocation,
        )
        .map(round_to_cents)
        .ok()
    }

    /// Current result, or `None` while the form is incomplete or invalid
    pub fn evaluate(&self) -> Option<MatchedBetResult> {
        match self.parse().and_then(|input| resolve(&input)) {
            Ok(result) => Some(result),
            Err(e) => {
                debug!("Matched bet unavailable: {}", e);
                None
            }
        }
    }
}

/// Cashback calculator form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashbackForm {
    pub amount: String,
    pub percentage: String,
}

impl CashbackForm {
    pub fn new(amount: impl Into<String>, percentage: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            percentage: percentage.into(),
        }
    }

    pub fn evaluate(&self) -> Option<f64> {
        let outcome = parse_number("amount", &self.amount).and_then(|amount| {
            let percentage = parse_number("percentage", &self.percentage)?;
            calculate_cashback(amount, percentage)
        });

        match outcome {
            Ok(cashback) => Some(cashback),
            Err(e) => {
                debug!("Cashback unavailable: {}", e);
                None
            }
        }
    }
}
