//! Matchbet - Matched betting toolkit
//!
//! This library provides:
//! - Lay stake sizing and outcome evaluation for back/lay pairs
//! - Risk allocation sweeps across the hedge slider
//! - Cashback calculation
//! - A text form layer that tolerates half-typed input
//! - Bankroll ledger summaries, goals and freebet tracking
//!
//! # Example
//!
//! ```
//! use matchbet::core::matched::{resolve, MatchedBetInput};
//!
//! // Back 100 at 2.0, lay at 2.1 with 6.5% commission
//! let input = MatchedBetInput::new(2.0, 100.0, 2.1, 6.5);
//! let result = resolve(&input).unwrap();
//! println!("Lay stake: {:.2}", result.lay_stake);
//! assert!(!result.is_surebet);
//! ```

pub mod config;
pub mod core;
pub mod form;
pub mod ledger;
pub mod models;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;

// Re-export commonly used types
pub use crate::config::{CalculatorDefaults, ServerConfig};
pub use crate::core::{
    calculate_cashback, resolve, risk_sweep, CalcError, MatchedBetInput, MatchedBetResult,
    SweepPoint, Verdict,
};
pub use crate::form::{CashbackForm, MatchedBetForm};
pub use crate::ledger::{LedgerEntry, LedgerFile, LedgerSummary};
