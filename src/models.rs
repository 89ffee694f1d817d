use serde::{Deserialize, Serialize};

use crate::config::CalculatorDefaults;
use crate::core::matched::{MatchedBetInput, MatchedBetResult, SweepPoint};

/// Default risk slider step for sweep requests
pub const DEFAULT_SWEEP_STEP: u8 = 10;

/// Matched bet calculation request
///
/// Commission and risk allocation fall back to the server defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedBetRequest {
    pub back_odd: f64,
    pub back_stake: f64,
    pub lay_odd: f64,
    #[serde(default)]
    pub commission_percent: Option<f64>,
    #[serde(default)]
    pub is_freebet: bool,
    #[serde(default)]
    pub risk_allocation: Option<u8>,
    /// Evaluate this lay stake instead of the optimal one
    #[serde(default)]
    pub lay_stake: Option<f64>,
}

impl MatchedBetRequest {
    pub fn to_input(&self, defaults: &CalculatorDefaults) -> MatchedBetInput {
        MatchedBetInput {
            back_odd: self.back_odd,
            back_stake: self.back_stake,
            is_freebet: self.is_freebet,
            lay_odd: self.lay_odd,
            commission_percent: self
                .commission_percent
                .unwrap_or(defaults.commission_percent),
            risk_allocation: self.risk_allocation.unwrap_or(defaults.risk_allocation),
            lay_stake_override: self.lay_stake,
        }
    }
}

/// Matched bet calculation response
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchedBetResponse {
    pub input: MatchedBetInput,
    pub result: MatchedBetResult,
}

/// Risk sweep request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    #[serde(flatten)]
    pub bet: MatchedBetRequest,
    #[serde(default = "default_sweep_step")]
    pub step: u8,
}

fn default_sweep_step() -> u8 {
    DEFAULT_SWEEP_STEP
}

/// Risk sweep response
#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    pub input: MatchedBetInput,
    pub points: Vec<SweepPoint>,
}

/// Cashback calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashbackRequest {
    pub amount: f64,
    pub percentage: f64,
}

/// Cashback calculation response
#[derive(Debug, Serialize, Deserialize)]
pub struct CashbackResponse {
    pub amount: f64,
    pub percentage: f64,
    pub cashback: f64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_applied() {
        let req: MatchedBetRequest =
            serde_json::from_str(r#"{"back_odd": 2.0, "back_stake": 100, "lay_odd": 2.1}"#)
                .unwrap();
        let input = req.to_input(&CalculatorDefaults::default());

        assert_eq!(input, MatchedBetInput::new(2.0, 100.0, 2.1, 6.5));
    }

    #[test]
    fn test_request_explicit_values() {
        let req: MatchedBetRequest = serde_json::from_str(
            r#"{"back_odd": 5.0, "back_stake": 50, "lay_odd": 5.5,
                "commission_percent": 2.0, "is_freebet": true,
                "risk_allocation": 80, "lay_stake": 40.0}"#,
        )
        .unwrap();
        let input = req.to_input(&CalculatorDefaults::default());

        assert!(input.is_freebet);
        assert_eq!(input.risk_allocation, 80);
        assert_eq!(input.commission_percent, 2.0);
        assert_eq!(input.lay_stake_override, Some(40.0));
    }

    #[test]
    fn test_sweep_request_step_default() {
        let req: SweepRequest =
            serde_json::from_str(r#"{"back_odd": 2.0, "back_stake": 100, "lay_odd": 2.1}"#)
                .unwrap();
        assert_eq!(req.step, DEFAULT_SWEEP_STEP);
        assert_eq!(req.bet.back_odd, 2.0);
    }
}
