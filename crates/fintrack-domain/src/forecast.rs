//! Derived forecast output types. Never persisted.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Item id used for the synthetic opening-balance entry.
pub const ANCHOR_ITEM_ID: &str = "current-balance";
/// Display name used for the synthetic opening-balance entry.
pub const ANCHOR_ITEM_NAME: &str = "Current Balance";

/// Inclusive `[start, start + days]` interval a forecast covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ForecastWindow {
    /// Builds the window for a horizon of `days` from `start`, saturating at the
    /// latest representable instant.
    pub fn new(start: NaiveDateTime, days: u32) -> Self {
        let end = start
            .checked_add_signed(Duration::days(days as i64))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date >= self.start && date <= self.end
    }

    /// Calendar days touched by the window, first and last included.
    pub fn calendar_days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date();
        self.start
            .date()
            .iter_days()
            .take_while(move |day| *day <= last)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ForecastItemKind {
    Income,
    Bill,
    Expense,
    Balance,
    Adjustment,
}

impl fmt::Display for ForecastItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ForecastItemKind::Income => "Income",
            ForecastItemKind::Bill => "Bill",
            ForecastItemKind::Expense => "Expense",
            ForecastItemKind::Balance => "Balance",
            ForecastItemKind::Adjustment => "Adjustment",
        };
        f.write_str(label)
    }
}

/// One projected cash-flow event with the balance after it is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastItem {
    pub item_id: String,
    pub date: NaiveDateTime,
    pub amount: f64,
    pub category: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ForecastItemKind,
    pub running_balance: f64,
    pub description: String,
}

impl ForecastItem {
    /// Builds the opening-balance entry that heads every forecast.
    pub fn anchor(date: NaiveDateTime, starting_balance: f64) -> Self {
        Self {
            item_id: ANCHOR_ITEM_ID.into(),
            date,
            amount: starting_balance,
            category: "Balance".into(),
            name: ANCHOR_ITEM_NAME.into(),
            kind: ForecastItemKind::Balance,
            running_balance: starting_balance,
            description: "Starting balance".into(),
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.kind == ForecastItemKind::Balance
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Per-day aggregate returned by the remote forecast callable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastRow {
    pub date: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net_change: f64,
    pub balance: f64,
}
