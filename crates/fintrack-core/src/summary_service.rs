//! Headline figures derived from a generated forecast.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use fintrack_domain::{ForecastItem, ForecastItemKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub net_change: f64,
    pub lowest_balance: f64,
    pub lowest_balance_date: Option<NaiveDateTime>,
    pub first_negative_date: Option<NaiveDateTime>,
    pub income_events: usize,
    pub bill_events: usize,
    pub expense_events: usize,
    pub adjustment_events: usize,
}

impl ForecastSummary {
    pub fn event_count(&self) -> usize {
        self.income_events + self.bill_events + self.expense_events + self.adjustment_events
    }

    pub fn goes_negative(&self) -> bool {
        self.first_negative_date.is_some()
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Summarises a forecast produced by [`crate::ForecastService::generate`].
    pub fn summarize(items: &[ForecastItem]) -> ForecastSummary {
        let mut summary = ForecastSummary::default();
        let Some(first) = items.first() else {
            return summary;
        };
        summary.starting_balance = if first.is_anchor() { first.amount } else { 0.0 };
        summary.lowest_balance = first.running_balance;
        summary.lowest_balance_date = Some(first.date);

        for item in items {
            if item.running_balance < summary.lowest_balance {
                summary.lowest_balance = item.running_balance;
                summary.lowest_balance_date = Some(item.date);
            }
            if summary.first_negative_date.is_none() && item.running_balance < 0.0 {
                summary.first_negative_date = Some(item.date);
            }
            match item.kind {
                ForecastItemKind::Balance => continue,
                ForecastItemKind::Income => summary.income_events += 1,
                ForecastItemKind::Bill => summary.bill_events += 1,
                ForecastItemKind::Expense => summary.expense_events += 1,
                ForecastItemKind::Adjustment => summary.adjustment_events += 1,
            }
            if item.amount >= 0.0 {
                summary.total_inflow += item.amount;
            } else {
                summary.total_outflow += item.amount.abs();
            }
        }

        summary.net_change = summary.total_inflow - summary.total_outflow;
        summary.ending_balance = items
            .last()
            .map(|item| item.running_balance)
            .unwrap_or(summary.starting_balance);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForecastInput, ForecastService, RecurrencePolicy};
    use chrono::{Duration, NaiveDate};
    use fintrack_domain::{Bill, BillFrequency, Expense, Frequency, Income};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn iso(offset_days: i64) -> String {
        (start() + Duration::days(offset_days))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    #[test]
    fn empty_forecast_summarizes_to_defaults() {
        let summary = SummaryService::summarize(&[]);
        assert_eq!(summary, ForecastSummary::default());
    }

    #[test]
    fn tracks_lowest_and_first_negative_balance() {
        let incomes = vec![Income::new("Pay", 400.0, iso(10), Frequency::Once)];
        let bills = vec![Bill::new("Rent", 600.0, iso(2), BillFrequency::Once)];
        let expenses = vec![Expense::new("Groceries", 50.0, iso(4))];
        let input = ForecastInput::new(300.0)
            .with_incomes(&incomes)
            .with_bills(&bills)
            .with_expenses(&expenses);
        let items = ForecastService::generate(start(), 30, input, RecurrencePolicy::default());

        let summary = SummaryService::summarize(&items);
        assert_eq!(summary.starting_balance, 300.0);
        assert_eq!(summary.total_inflow, 400.0);
        assert_eq!(summary.total_outflow, 650.0);
        assert_eq!(summary.net_change, -250.0);
        assert_eq!(summary.ending_balance, 50.0);
        assert_eq!(summary.lowest_balance, -350.0);
        assert_eq!(summary.lowest_balance_date, Some(start() + Duration::days(4)));
        assert_eq!(summary.first_negative_date, Some(start() + Duration::days(2)));
        assert_eq!(summary.event_count(), 3);
        assert!(summary.goes_negative());
    }
}
