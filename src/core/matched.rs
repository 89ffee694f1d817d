//! Matched Betting Resolver
//!
//! Sizes the lay side of a back/lay pair and evaluates both settlement
//! outcomes.
//!
//! Lay stake:
//!     L = S * O / (Ol - c)            (normal back bet)
//!     L = S * (O - 1) / (Ol - c)      (freebet, stake not returned)
//!     L' = L * (1 + (r - 50) / 100 * 0.2)
//!
//! Where:
//!     S  = back stake
//!     O  = back odd (decimal)
//!     Ol = lay odd (decimal)
//!     c  = commission as a fraction (6.5% -> 0.065)
//!     r  = risk allocation (0-100, 50 = neutral)
//!
//! Commission is applied to the whole lay return (`L * (1 - c)`), not only to
//! the exchange profit. Existing fixtures depend on that model.

use serde::{Deserialize, Serialize};

use super::validation::{
    validate_commission, validate_lay_stake, validate_odd, validate_risk_allocation,
    validate_stake, CalcError,
};

/// Risk allocation that leaves the optimal lay stake untouched
pub const NEUTRAL_RISK_ALLOCATION: u8 = 50;

/// Largest relative shift the risk slider can apply (at 0 or 100)
pub const MAX_RISK_ADJUSTMENT: f64 = 0.2;

/// Inputs for one matched bet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedBetInput {
    pub back_odd: f64,
    pub back_stake: f64,
    pub is_freebet: bool,
    pub lay_odd: f64,
    pub commission_percent: f64,
    pub risk_allocation: u8,
    /// Lay stake typed by the user; skips the optimizer when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lay_stake_override: Option<f64>,
}

impl MatchedBetInput {
    /// Normal back bet at neutral risk
    pub fn new(back_odd: f64, back_stake: f64, lay_odd: f64, commission_percent: f64) -> Self {
        Self {
            back_odd,
            back_stake,
            is_freebet: false,
            lay_odd,
            commission_percent,
            risk_allocation: NEUTRAL_RISK_ALLOCATION,
            lay_stake_override: None,
        }
    }

    pub fn freebet(mut self, is_freebet: bool) -> Self {
        self.is_freebet = is_freebet;
        self
    }

    pub fn with_risk_allocation(mut self, risk_allocation: u8) -> Self {
        self.risk_allocation = risk_allocation;
        self
    }

    pub fn with_lay_stake(mut self, lay_stake: f64) -> Self {
        self.lay_stake_override = Some(lay_stake);
        self
    }
}

/// How the position settles across both outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Both outcomes strictly positive
    Surebet,
    /// Not guaranteed, but at least one outcome breaks even or better
    ValueExtraction,
    /// Both outcomes lose
    Loss,
}

impl Verdict {
    fn classify(profit_if_back_wins: f64, profit_if_lay_wins: f64) -> Self {
        if profit_if_back_wins > 0.0 && profit_if_lay_wins > 0.0 {
            Verdict::Surebet
        } else if profit_if_back_wins >= 0.0 || profit_if_lay_wins >= 0.0 {
            Verdict::ValueExtraction
        } else {
            Verdict::Loss
        }
    }
}

/// Fully evaluated matched bet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedBetResult {
    pub lay_stake: f64,
    pub required_balance: f64,
    pub profit_if_back_wins: f64,
    pub profit_if_lay_wins: f64,
    pub is_surebet: bool,
    pub profit_percentage: f64,
    pub total_invested: f64,
    pub verdict: Verdict,
    /// Share of the freebet's face value kept in the better outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freebet_extraction_percentage: Option<f64>,
}

impl MatchedBetResult {
    pub fn min_profit(&self) -> f64 {
        self.profit_if_back_wins.min(self.profit_if_lay_wins)
    }

    pub fn max_profit(&self) -> f64 {
        self.profit_if_back_wins.max(self.profit_if_lay_wins)
    }
}

/// Calculate the lay stake that hedges a back bet
///
/// # Arguments
/// * `back_odd` - Decimal back odd (> 1)
/// * `back_stake` - Back stake (> 0)
/// * `lay_odd` - Decimal lay odd (> 1)
/// * `commission_percent` - Exchange commission in percent, within [0, 100)
/// * `is_freebet` - Back stake is a freebet and is not returned on a win
/// * `risk_allocation` - 0-100, 50 = neutral
///
/// # Examples
/// ```
/// use matchbet::core::matched::compute_optimal_lay_stake;
/// let lay = compute_optimal_lay_stake(3.0, 100.0, 2.5, 0.0, false, 50).unwrap();
/// assert!((lay - 120.0).abs() < 1e-9);
/// ```
pub fn compute_optimal_lay_stake(
    back_odd: f64,
    back_stake: f64,
    lay_odd: f64,
    commission_percent: f64,
    is_freebet: bool,
    risk_allocation: u8,
) -> Result<f64, CalcError> {
    validate_odd("back_odd", back_odd)?;
    validate_stake("back_stake", back_stake)?;
    validate_odd("lay_odd", lay_odd)?;
    validate_commission(commission_percent)?;
    validate_risk_allocation(risk_allocation)?;

    let commission = commission_percent / 100.0;
    let denominator = lay_odd - commission;
    // Unreachable once lay_odd > 1 and commission < 1 hold
    if denominator <= 0.0 {
        return Err(CalcError::DegenerateOdds {
            lay_odd,
            commission,
        });
    }

    let optimal = if is_freebet {
        back_stake * (back_odd - 1.0) / denominator
    } else {
        back_stake * back_odd / denominator
    };

    let risk_factor = (f64::from(risk_allocation) - f64::from(NEUTRAL_RISK_ALLOCATION)) / 100.0;
    let lay_stake = optimal * (1.0 + risk_factor * MAX_RISK_ADJUSTMENT);

    if !lay_stake.is_finite() {
        return Err(CalcError::DegenerateOdds {
            lay_odd,
            commission,
        });
    }

    Ok(lay_stake)
}

/// Evaluate both settlement outcomes for a given lay stake
pub fn evaluate_outcomes(
    back_odd: f64,
    back_stake: f64,
    lay_odd: f64,
    lay_stake: f64,
    commission_percent: f64,
    is_freebet: bool,
) -> Result<MatchedBetResult, CalcError> {
    validate_odd("back_odd", back_odd)?;
    validate_stake("back_stake", back_stake)?;
    validate_odd("lay_odd", lay_odd)?;
    validate_lay_stake(lay_stake)?;
    validate_commission(commission_percent)?;

    let commission = commission_percent / 100.0;
    let required_balance = lay_stake * (lay_odd - 1.0);

    let (profit_if_back_wins, profit_if_lay_wins) = if is_freebet {
        (
            back_stake * (back_odd - 1.0) - lay_stake * (lay_odd - 1.0),
            lay_stake * (1.0 - commission),
        )
    } else {
        (
            back_stake * back_odd - back_stake - lay_stake * (lay_odd - 1.0),
            -back_stake + lay_stake * (1.0 - commission),
        )
    };

    let total_invested = if is_freebet {
        required_balance
    } else {
        back_stake + required_balance
    };
    if total_invested <= 0.0 {
        return Err(CalcError::NoCapitalAtRisk);
    }

    let min_profit = profit_if_back_wins.min(profit_if_lay_wins);
    let profit_percentage = min_profit / total_invested * 100.0;

    let freebet_extraction_percentage = is_freebet
        .then(|| profit_if_back_wins.max(profit_if_lay_wins) / back_stake * 100.0);

    // A huge lay stake can overflow the derived amounts
    let derived = [
        required_balance,
        profit_if_back_wins,
        profit_if_lay_wins,
        total_invested,
        profit_percentage,
        freebet_extraction_percentage.unwrap_or(0.0),
    ];
    if derived.iter().any(|value| !value.is_finite()) {
        return Err(CalcError::NonFiniteInput { field: "lay_stake" });
    }

    Ok(MatchedBetResult {
        lay_stake,
        required_balance,
        profit_if_back_wins,
        profit_if_lay_wins,
        is_surebet: profit_if_back_wins > 0.0 && profit_if_lay_wins > 0.0,
        profit_percentage,
        total_invested,
        verdict: Verdict::classify(profit_if_back_wins, profit_if_lay_wins),
        freebet_extraction_percentage,
    })
}

/// Size the lay stake (unless overridden) and evaluate the position
///
/// `.ok()` on the outcome gives the "no result" signal callers display while
/// inputs are incomplete.
///
/// # Examples
/// ```
/// use matchbet::core::matched::{resolve, MatchedBetInput, Verdict};
/// let result = resolve(&MatchedBetInput::new(3.0, 100.0, 2.5, 0.0)).unwrap();
/// assert!(result.is_surebet);
/// assert_eq!(result.verdict, Verdict::Surebet);
/// ```
pub fn resolve(input: &MatchedBetInput) -> Result<MatchedBetResult, CalcError> {
    let lay_stake = match input.lay_stake_override {
        Some(lay_stake) => lay_stake,
        None => compute_optimal_lay_stake(
            input.back_odd,
            input.back_stake,
            input.lay_odd,
            input.commission_percent,
            input.is_freebet,
            input.risk_allocation,
        )?,
    };

    evaluate_outcomes(
        input.back_odd,
        input.back_stake,
        input.lay_odd,
        lay_stake,
        input.commission_percent,
        input.is_freebet,
    )
}

/// One position of the risk slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub risk_allocation: u8,
    pub result: MatchedBetResult,
}

/// Resolve the bet at every `step` of the risk slider, 0 and 100 included
///
/// Any lay stake override on `input` is ignored.
pub fn risk_sweep(input: &MatchedBetInput, step: u8) -> Result<Vec<SweepPoint>, CalcError> {
    if step == 0 || step > 100 {
        return Err(CalcError::InvalidSweepStep(step));
    }

    let mut allocations: Vec<u8> = (0..=100u8).step_by(step as usize).collect();
    if allocations.last() != Some(&100) {
        allocations.push(100);
    }

    allocations
        .into_iter()
        .map(|risk_allocation| {
            let point_input = MatchedBetInput {
                risk_allocation,
                lay_stake_override: None,
                ..*input
            };
            resolve(&point_input).map(|result| SweepPoint {
                risk_allocation,
                result,
            })
        })
        .collect()
}
