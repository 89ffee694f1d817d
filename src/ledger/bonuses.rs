//! Freebet and bonus tracking

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::validation::CalcError;

/// Days before expiry at which a pending freebet is flagged
pub const EXPIRY_ALERT_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreebetStatus {
    Pending,
    Extracted,
    Expired,
}

/// A freebet credited by a betting house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreebetEntry {
    pub date: NaiveDate,
    pub betting_house: String,
    pub value: f64,
    pub status: FreebetStatus,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn validate_value(value: f64) -> Result<(), CalcError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::InvalidLedgerValue(value));
    }
    Ok(())
}

impl FreebetEntry {
    pub fn validate(&self) -> Result<(), CalcError> {
        validate_value(self.value)
    }

    pub fn is_pending(&self) -> bool {
        self.status == FreebetStatus::Pending
    }

    /// Whole days until expiry (negative once past)
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date
            .map(|expiry| expiry.signed_duration_since(today).num_days())
    }
}

pub fn pending(freebets: &[FreebetEntry]) -> Vec<&FreebetEntry> {
    freebets.iter().filter(|f| f.is_pending()).collect()
}

pub fn total_pending_value(freebets: &[FreebetEntry]) -> f64 {
    freebets
        .iter()
        .filter(|f| f.is_pending())
        .map(|f| f.value)
        .sum()
}

/// Pending freebets expiring between today and `within_days` from now
pub fn expiring_soon(
    freebets: &[FreebetEntry],
    today: NaiveDate,
    within_days: i64,
) -> Vec<&FreebetEntry> {
    freebets
        .iter()
        .filter(|f| f.is_pending())
        .filter(|f| {
            f.days_until_expiry(today)
                .is_some_and(|days| (0..=within_days).contains(&days))
        })
        .collect()
}

/// Mark pending freebets whose expiry date has passed; returns how many changed
pub fn expire_overdue(freebets: &mut [FreebetEntry], today: NaiveDate) -> usize {
    let mut expired = 0;
    for freebet in freebets.iter_mut().filter(|f| f.is_pending()) {
        if freebet.days_until_expiry(today).is_some_and(|days| days < 0) {
            freebet.status = FreebetStatus::Expired;
            expired += 1;
        }
    }
    expired
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    Freebet,
    FreeSpins,
    CashbackBonus,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStatus {
    Active,
    Used,
    Expired,
}

/// Promotional bonus; free spins usually carry no cash value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub date: NaiveDate,
    pub description: String,
    pub kind: BonusKind,
    pub status: BonusStatus,
    #[serde(default)]
    pub value: Option<f64>,
}

impl BonusEntry {
    /// Bonuses without a cash value are always valid
    pub fn validate(&self) -> Result<(), CalcError> {
        self.value.map_or(Ok(()), validate_value)
    }
}

pub fn active_bonus_value(bonuses: &[BonusEntry]) -> f64 {
    bonuses
        .iter()
        .filter(|b| b.status == BonusStatus::Active)
        .filter_map(|b| b.value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn freebet(value: f64, status: FreebetStatus, expiry: Option<NaiveDate>) -> FreebetEntry {
        FreebetEntry {
            date: date(2024, 5, 1),
            betting_house: "Bet365".to_string(),
            value,
            status,
            expiry_date: expiry,
        }
    }

    fn sample_freebets() -> Vec<FreebetEntry> {
        vec![
            freebet(20.0, FreebetStatus::Pending, Some(date(2024, 5, 12))),
            freebet(10.0, FreebetStatus::Pending, Some(date(2024, 5, 30))),
            freebet(15.0, FreebetStatus::Pending, None),
            freebet(50.0, FreebetStatus::Extracted, Some(date(2024, 5, 11))),
            freebet(5.0, FreebetStatus::Pending, Some(date(2024, 5, 8))),
        ]
    }

    #[test]
    fn test_pending_totals() {
        let freebets = sample_freebets();
        assert_eq!(pending(&freebets).len(), 4);
        assert!((total_pending_value(&freebets) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_days_until_expiry() {
        let freebets = sample_freebets();
        let today = date(2024, 5, 10);
        assert_eq!(freebets[0].days_until_expiry(today), Some(2));
        assert_eq!(freebets[2].days_until_expiry(today), None);
        assert_eq!(freebets[4].days_until_expiry(today), Some(-2));
    }

    #[test]
    fn test_expiring_soon_window() {
        let freebets = sample_freebets();
        let today = date(2024, 5, 10);

        let soon = expiring_soon(&freebets, today, EXPIRY_ALERT_DAYS);
        assert_eq!(soon.len(), 1);
        assert!((soon[0].value - 20.0).abs() < 1e-9);

        // Expiry exactly on the boundary day still counts
        let soon = expiring_soon(&freebets, date(2024, 5, 9), EXPIRY_ALERT_DAYS);
        assert_eq!(soon.len(), 1);
        let soon = expiring_soon(&freebets, date(2024, 5, 12), EXPIRY_ALERT_DAYS);
        assert_eq!(soon.len(), 1);
    }

    #[test]
    fn test_expire_overdue() {
        let mut freebets = sample_freebets();
        let changed = expire_overdue(&mut freebets, date(2024, 5, 10));

        assert_eq!(changed, 1);
        assert_eq!(freebets[4].status, FreebetStatus::Expired);
        assert_eq!(freebets[3].status, FreebetStatus::Extracted);
        assert!((total_pending_value(&freebets) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_active_bonus_value() {
        let bonuses = vec![
            BonusEntry {
                date: date(2024, 5, 20),
                description: "Freebet 20".to_string(),
                kind: BonusKind::Freebet,
                status: BonusStatus::Active,
                value: Some(20.0),
            },
            BonusEntry {
                date: date(2024, 5, 15),
                description: "25 free spins".to_string(),
                kind: BonusKind::FreeSpins,
                status: BonusStatus::Active,
                value: None,
            },
            BonusEntry {
                date: date(2024, 4, 10),
                description: "Weekly cashback 10%".to_string(),
                kind: BonusKind::CashbackBonus,
                status: BonusStatus::Expired,
                value: Some(15.5),
            },
        ];

        assert!((active_bonus_value(&bonuses) - 20.0).abs() < 1e-9);
    }
}
