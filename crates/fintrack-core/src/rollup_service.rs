//! Calendar grouping and per-day aggregation of forecast items.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use fintrack_domain::{DailyForecastRow, ForecastItem, ForecastWindow};

pub struct RollupService;

impl RollupService {
    /// Groups non-anchor items by calendar day, preserving forecast order within a day.
    pub fn group_by_day(items: &[ForecastItem]) -> BTreeMap<NaiveDate, Vec<&ForecastItem>> {
        let mut days: BTreeMap<NaiveDate, Vec<&ForecastItem>> = BTreeMap::new();
        for item in items.iter().filter(|item| !item.is_anchor()) {
            days.entry(item.day()).or_default().push(item);
        }
        days
    }

    /// Produces one row per calendar day of `window`, carrying the balance
    /// forward across days without activity.
    ///
    /// Positive amounts count as income and negative amounts as expenses, so
    /// adjustments land on whichever side their sign puts them.
    pub fn daily(items: &[ForecastItem], window: ForecastWindow) -> Vec<DailyForecastRow> {
        let grouped = Self::group_by_day(items);
        let mut balance = items
            .iter()
            .find(|item| item.is_anchor())
            .map(|item| item.amount)
            .unwrap_or(0.0);

        window
            .calendar_days()
            .map(|date| {
                let mut income = 0.0;
                let mut expenses = 0.0;
                for item in grouped.get(&date).into_iter().flatten() {
                    if item.amount >= 0.0 {
                        income += item.amount;
                    } else {
                        expenses += item.amount.abs();
                    }
                }
                let net_change = income - expenses;
                balance += net_change;
                DailyForecastRow {
                    date,
                    income,
                    expenses,
                    net_change,
                    balance,
                }
            })
            .collect()
    }
}
