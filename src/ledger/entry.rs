//! Profit/loss entries and history filtering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::validation::CalcError;

/// How a profit was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitType {
    Surebet,
    FreebetExtraction,
    FreeSpins,
    SuperOdd,
}

impl ProfitType {
    pub const ALL: [ProfitType; 4] = [
        ProfitType::Surebet,
        ProfitType::FreebetExtraction,
        ProfitType::FreeSpins,
        ProfitType::SuperOdd,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfitType::Surebet => "Surebet",
            ProfitType::FreebetExtraction => "Freebet extraction",
            ProfitType::FreeSpins => "Free spins",
            ProfitType::SuperOdd => "Super odd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Profit { profit_type: ProfitType },
    Loss,
}

/// One logged result at a betting house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub betting_house: String,
    /// Always positive; the sign comes from `kind`
    pub value: f64,
    pub kind: EntryKind,
}

impl LedgerEntry {
    pub fn profit(
        date: NaiveDate,
        betting_house: impl Into<String>,
        value: f64,
        profit_type: ProfitType,
    ) -> Result<Self, CalcError> {
        let entry = Self {
            date,
            betting_house: betting_house.into(),
            value,
            kind: EntryKind::Profit { profit_type },
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn loss(
        date: NaiveDate,
        betting_house: impl Into<String>,
        value: f64,
    ) -> Result<Self, CalcError> {
        let entry = Self {
            date,
            betting_house: betting_house.into(),
            value,
            kind: EntryKind::Loss,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(CalcError::InvalidLedgerValue(self.value));
        }
        Ok(())
    }

    pub fn is_profit(&self) -> bool {
        matches!(self.kind, EntryKind::Profit { .. })
    }

    pub fn profit_type(&self) -> Option<ProfitType> {
        match self.kind {
            EntryKind::Profit { profit_type } => Some(profit_type),
            EntryKind::Loss => None,
        }
    }

    /// Value with its sign applied
    pub fn signed_value(&self) -> f64 {
        if self.is_profit() {
            self.value
        } else {
            -self.value
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    #[default]
    All,
    Profit,
    Loss,
}

/// History filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub kind: KindFilter,
    pub betting_house: Option<String>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let after_from = self.from.map_or(true, |from| entry.date >= from);
        let before_to = self.to.map_or(true, |to| entry.date <= to);
        let kind = match self.kind {
            KindFilter::All => true,
            KindFilter::Profit => entry.is_profit(),
            KindFilter::Loss => !entry.is_profit(),
        };
        let house = self
            .betting_house
            .as_ref()
            .map_or(true, |house| &entry.betting_house == house);

        after_from && before_to && kind && house
    }

    pub fn apply<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
