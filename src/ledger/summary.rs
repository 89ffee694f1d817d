//! Ledger Summary
//!
//! Totals, per-period buckets and goal progress.

use super::entry::{LedgerEntry, ProfitType};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate totals over a set of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub entries: usize,
    pub profit_entries: usize,
    pub loss_entries: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub net_profit: f64,
    pub profit_by_type: BTreeMap<ProfitType, f64>,
}

impl Default for LedgerSummary {
    fn default() -> Self {
        Self {
            entries: 0,
            profit_entries: 0,
            loss_entries: 0,
            gross_profit: 0.0,
            gross_loss: 0.0,
            net_profit: 0.0,
            profit_by_type: BTreeMap::new(),
        }
    }
}

pub fn summarize<'a, I>(entries: I) -> LedgerSummary
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut summary = LedgerSummary::default();

    for entry in entries {
        summary.entries += 1;
        match entry.profit_type() {
            Some(profit_type) => {
                summary.profit_entries += 1;
                summary.gross_profit += entry.value;
                *summary.profit_by_type.entry(profit_type).or_insert(0.0) += entry.value;
            }
            None => {
                summary.loss_entries += 1;
                summary.gross_loss += entry.value;
            }
        }
    }

    summary.net_profit = summary.gross_profit - summary.gross_loss;
    summary
}

/// Net result for one day or month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// First day of the period
    pub period: NaiveDate,
    pub net_profit: f64,
    pub entries: usize,
}

fn bucket_by<'a, I, F>(entries: I, key: F) -> Vec<PeriodTotal>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
    F: Fn(NaiveDate) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let bucket = buckets.entry(key(entry.date)).or_insert((0.0, 0));
        bucket.0 += entry.signed_value();
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(period, (net_profit, entries))| PeriodTotal {
            period,
            net_profit,
            entries,
        })
        .collect()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Per-day net profit, oldest first
pub fn daily_totals<'a, I>(entries: I) -> Vec<PeriodTotal>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    bucket_by(entries, |date| date)
}

/// Per-month net profit, oldest first
pub fn monthly_totals<'a, I>(entries: I) -> Vec<PeriodTotal>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    bucket_by(entries, month_start)
}

/// User targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub daily_profit_goal: f64,
    pub daily_entries_goal: u32,
    pub monthly_profit_goal: f64,
}

/// Progress against `Goals` as of a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub today_profit: f64,
    pub today_entries: usize,
    pub month_profit: f64,
    pub daily_profit_ratio: f64,
    pub daily_entries_ratio: f64,
    pub monthly_profit_ratio: f64,
}

impl GoalProgress {
    pub fn daily_goal_met(&self) -> bool {
        self.daily_profit_ratio >= 1.0 && self.daily_entries_ratio >= 1.0
    }

    pub fn monthly_goal_met(&self) -> bool {
        self.monthly_profit_ratio >= 1.0
    }
}

fn ratio(actual: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        actual / goal
    } else {
        0.0
    }
}

pub fn goal_progress(entries: &[LedgerEntry], goals: &Goals, today: NaiveDate) -> GoalProgress {
    let this_month = month_start(today);

    let mut today_profit = 0.0;
    let mut today_entries = 0;
    let mut month_profit = 0.0;

    for entry in entries {
        if entry.date == today {
            today_profit += entry.signed_value();
            today_entries += 1;
        }
        if month_start(entry.date) == this_month {
            month_profit += entry.signed_value();
        }
    }

    GoalProgress {
        today_profit,
        today_entries,
        month_profit,
        daily_profit_ratio: ratio(today_profit, goals.daily_profit_goal),
        daily_entries_ratio: ratio(today_entries as f64, f64::from(goals.daily_entries_goal)),
        monthly_profit_ratio: ratio(month_profit, goals.monthly_profit_goal),
    }
}
