//! Bankroll ledger
//!
//! In-memory bookkeeping over logged results, freebets and bonuses. Storage
//! belongs to the caller; this module only reads a JSON snapshot.
//!
//! # Example
//!
//! ```
//! use matchbet::ledger::{summarize, LedgerFile};
//!
//! let file = LedgerFile::from_json_str(r#"{
//!     "entries": [
//!         { "date": "2024-05-20", "betting_house": "Bet365", "value": 45.5,
//!           "kind": { "type": "profit", "profit_type": "surebet" } }
//!     ]
//! }"#).unwrap();
//!
//! let summary = summarize(&file.entries);
//! assert_eq!(summary.entries, 1);
//! ```

pub mod bonuses;
pub mod entry;
pub mod summary;

pub use bonuses::{
    active_bonus_value, expire_overdue, expiring_soon, pending, total_pending_value, BonusEntry,
    BonusKind, BonusStatus, FreebetEntry, FreebetStatus, EXPIRY_ALERT_DAYS,
};
pub use entry::{EntryKind, KindFilter, LedgerEntry, LedgerFilter, ProfitType};
pub use summary::{
    daily_totals, goal_progress, monthly_totals, summarize, GoalProgress, Goals, LedgerSummary,
    PeriodTotal,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::validation::CalcError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Failed to read ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ledger JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid entry #{index}: {source}")]
    InvalidEntry { index: usize, source: CalcError },

    #[error("Invalid freebet #{index}: {source}")]
    InvalidFreebet { index: usize, source: CalcError },

    #[error("Invalid bonus #{index}: {source}")]
    InvalidBonus { index: usize, source: CalcError },
}

/// Ledger snapshot as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    #[serde(default)]
    pub freebets: Vec<FreebetEntry>,
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    #[serde(default)]
    pub goals: Option<Goals>,
}

impl LedgerFile {
    pub fn from_json_str(content: &str) -> Result<Self, LedgerError> {
        let file: LedgerFile = serde_json::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), LedgerError> {
        for (index, entry) in self.entries.iter().enumerate() {
            entry
                .validate()
                .map_err(|source| LedgerError::InvalidEntry { index, source })?;
        }
        for (index, freebet) in self.freebets.iter().enumerate() {
            freebet
                .validate()
                .map_err(|source| LedgerError::InvalidFreebet { index, source })?;
        }
        for (index, bonus) in self.bonuses.iter().enumerate() {
            bonus
                .validate()
                .map_err(|source| LedgerError::InvalidBonus { index, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = LedgerFile::from_json_str("{}").unwrap();
        assert_eq!(file, LedgerFile::default());
    }

    #[test]
    fn test_full_file() {
        let json = r#"{
            "entries": [
                { "date": "2024-05-20", "betting_house": "Bet365", "value": 45.5,
                  "kind": { "type": "profit", "profit_type": "surebet" } },
                { "date": "2024-05-21", "betting_house": "Betano", "value": 20.0,
                  "kind": { "type": "loss" } }
            ],
            "freebets": [
                { "date": "2024-05-01", "betting_house": "Bet365", "value": 20.0,
                  "status": "pending", "expiry_date": "2024-05-12" }
            ],
            "bonuses": [
                { "date": "2024-05-15", "description": "25 free spins",
                  "kind": "free_spins", "status": "active" }
            ],
            "goals": { "daily_profit_goal": 50.0, "daily_entries_goal": 3,
                       "monthly_profit_goal": 1000.0 }
        }"#;

        let file = LedgerFile::from_json_str(json).unwrap();
        assert_eq!(file.entries.len(), 2);
        assert_eq!(file.freebets.len(), 1);
        assert_eq!(file.bonuses[0].value, None);
        assert_eq!(file.goals.map(|g| g.daily_entries_goal), Some(3));
    }

    #[test]
    fn test_invalid_entry_value() {
        let json = r#"{ "entries": [
            { "date": "2024-05-21", "betting_house": "Betano", "value": -20.0,
              "kind": { "type": "loss" } }
        ] }"#;

        match LedgerFile::from_json_str(json) {
            Err(LedgerError::InvalidEntry { index, source }) => {
                assert_eq!(index, 0);
                assert_eq!(source, CalcError::InvalidLedgerValue(-20.0));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_other_bonus_kind() {
        let json = r#"{ "bonuses": [
            { "date": "2024-05-15", "description": "Loyalty reward",
              "kind": "other", "status": "active", "value": 15.0 }
        ] }"#;

        let file = LedgerFile::from_json_str(json).unwrap();
        assert_eq!(file.bonuses[0].kind, BonusKind::Other);
        assert_eq!(active_bonus_value(&file.bonuses), 15.0);
    }

    #[test]
    fn test_invalid_freebet_value() {
        let json = r#"{ "freebets": [
            { "date": "2024-05-01", "betting_house": "Bet365", "value": 20.0,
              "status": "pending" },
            { "date": "2024-05-02", "betting_house": "Betano", "value": -50.0,
              "status": "pending" }
        ] }"#;

        match LedgerFile::from_json_str(json) {
            Err(LedgerError::InvalidFreebet { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, CalcError::InvalidLedgerValue(-50.0));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_zero_freebet_value() {
        let json = r#"{ "freebets": [
            { "date": "2024-05-01", "betting_house": "Bet365", "value": 0.0,
              "status": "pending" }
        ] }"#;

        assert!(matches!(
            LedgerFile::from_json_str(json),
            Err(LedgerError::InvalidFreebet { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_bonus_value() {
        let json = r#"{ "bonuses": [
            { "date": "2024-05-15", "description": "25 free spins",
              "kind": "free_spins", "status": "active" },
            { "date": "2024-05-16", "description": "Cashback",
              "kind": "cashback_bonus", "status": "active", "value": -5.0 }
        ] }"#;

        match LedgerFile::from_json_str(json) {
            Err(LedgerError::InvalidBonus { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, CalcError::InvalidLedgerValue(-5.0));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LedgerFile::from_json_str("{ not json"),
            Err(LedgerError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            LedgerFile::load("/nonexistent/ledger.json"),
            Err(LedgerError::Io(_))
        ));
    }
}
