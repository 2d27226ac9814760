//! Cash-flow forecasting over stored income, bill, expense and adjustment records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use fintrack_domain::{
    BalanceAdjustment, Bill, Dated, Expense, ForecastItem, ForecastItemKind, ForecastWindow,
    Frequency, Income, UserRecords,
};

use crate::recurrence_service::RecurrenceService;

/// Selects how recurring records contribute to a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePolicy {
    /// Each record contributes at most its stored date.
    #[default]
    SingleOccurrence,
    /// Recurring incomes and unpaid bills are stepped through the window.
    Expand,
}

/// Borrowed view of the records a forecast reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastInput<'a> {
    pub starting_balance: f64,
    pub incomes: &'a [Income],
    pub bills: &'a [Bill],
    pub expenses: &'a [Expense],
    pub adjustments: &'a [BalanceAdjustment],
}

impl<'a> ForecastInput<'a> {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            starting_balance,
            ..Self::default()
        }
    }

    pub fn with_incomes(mut self, incomes: &'a [Income]) -> Self {
        self.incomes = incomes;
        self
    }

    pub fn with_bills(mut self, bills: &'a [Bill]) -> Self {
        self.bills = bills;
        self
    }

    pub fn with_expenses(mut self, expenses: &'a [Expense]) -> Self {
        self.expenses = expenses;
        self
    }

    pub fn with_adjustments(mut self, adjustments: &'a [BalanceAdjustment]) -> Self {
        self.adjustments = adjustments;
        self
    }
}

impl<'a> From<&'a UserRecords> for ForecastInput<'a> {
    fn from(records: &'a UserRecords) -> Self {
        Self {
            starting_balance: records.starting_balance,
            incomes: &records.incomes,
            bills: &records.bills,
            expenses: &records.expenses,
            adjustments: &records.adjustments,
        }
    }
}

pub struct ForecastService;

impl ForecastService {
    /// Projects dated cash-flow events for `[start, start + days]`.
    ///
    /// The first item is always the `balance` anchor carrying
    /// `input.starting_balance`. Remaining items are ordered by date with ties
    /// kept in emission order (incomes, bills, expenses, adjustments) and each
    /// carries the balance after its amount is applied. Records whose date is
    /// missing or unparseable are skipped.
    pub fn generate(
        start: NaiveDateTime,
        days: u32,
        input: ForecastInput<'_>,
        policy: RecurrencePolicy,
    ) -> Vec<ForecastItem> {
        let window = ForecastWindow::new(start, days);
        let mut items = vec![ForecastItem::anchor(start, input.starting_balance)];
        let mut skipped = 0usize;

        for income in input.incomes {
            let Some(date) = income.occurs_at() else {
                skipped += 1;
                continue;
            };
            let frequency = income.effective_frequency();
            for (index, occurrence) in occurrences(date, frequency, window, policy)
                .into_iter()
                .enumerate()
            {
                items.push(ForecastItem {
                    item_id: occurrence_id(&income.id, index),
                    date: occurrence,
                    amount: income.amount.abs(),
                    category: category_or(&income.category, "Income"),
                    name: income.name.clone(),
                    kind: ForecastItemKind::Income,
                    running_balance: 0.0,
                    description: income_description(frequency),
                });
            }
        }

        for bill in input.bills.iter().filter(|bill| !bill.is_paid) {
            let Some(date) = bill.occurs_at() else {
                skipped += 1;
                continue;
            };
            let frequency = Frequency::from(bill.frequency);
            for (index, occurrence) in occurrences(date, frequency, window, policy)
                .into_iter()
                .enumerate()
            {
                items.push(ForecastItem {
                    item_id: occurrence_id(&bill.id, index),
                    date: occurrence,
                    amount: -bill.amount.abs(),
                    category: category_or(&bill.category, "Bills"),
                    name: bill.name.clone(),
                    kind: ForecastItemKind::Bill,
                    running_balance: 0.0,
                    description: bill_description(frequency),
                });
            }
        }

        for expense in input.expenses {
            let Some(date) = expense.occurs_at() else {
                skipped += 1;
                continue;
            };
            if !window.contains(date) {
                continue;
            }
            items.push(ForecastItem {
                item_id: expense.id.clone(),
                date,
                amount: -expense.amount.abs(),
                category: category_or(&expense.category, "Expenses"),
                name: expense.name.clone(),
                kind: ForecastItemKind::Expense,
                running_balance: 0.0,
                description: "Expense".into(),
            });
        }

        for adjustment in input.adjustments {
            let Some(date) = adjustment.occurs_at() else {
                skipped += 1;
                continue;
            };
            if !window.contains(date) {
                continue;
            }
            let description = if adjustment.reason.trim().is_empty() {
                "Balance adjustment".to_string()
            } else {
                adjustment.reason.clone()
            };
            items.push(ForecastItem {
                item_id: adjustment.id.clone(),
                date,
                amount: adjustment.amount,
                category: "Adjustment".into(),
                name: "Balance Adjustment".into(),
                kind: ForecastItemKind::Adjustment,
                running_balance: 0.0,
                description,
            });
        }

        items.sort_by_key(|item| item.date);
        apply_running_balance(&mut items);

        if skipped > 0 {
            tracing::trace!(skipped, "records without a usable date were left out");
        }
        tracing::debug!(
            events = items.len() - 1,
            days,
            ?policy,
            "forecast generated"
        );
        items
    }

    /// Forecast over a full [`UserRecords`] bundle.
    pub fn generate_for_records(
        records: &UserRecords,
        start: NaiveDateTime,
        days: u32,
        policy: RecurrencePolicy,
    ) -> Vec<ForecastItem> {
        Self::generate(start, days, ForecastInput::from(records), policy)
    }
}

/// Recomputes `running_balance` for a date-sorted forecast.
///
/// The anchor resets the running total to its own amount; every other item adds
/// its signed amount.
pub fn apply_running_balance(items: &mut [ForecastItem]) {
    let mut running = 0.0;
    for item in items.iter_mut() {
        if item.is_anchor() {
            running = item.amount;
        } else {
            running += item.amount;
        }
        item.running_balance = running;
    }
}

fn occurrences(
    date: NaiveDateTime,
    frequency: Frequency,
    window: ForecastWindow,
    policy: RecurrencePolicy,
) -> Vec<NaiveDateTime> {
    match policy {
        RecurrencePolicy::SingleOccurrence => {
            if window.contains(date) {
                vec![date]
            } else {
                Vec::new()
            }
        }
        RecurrencePolicy::Expand => RecurrenceService::occurrences_in_window(date, frequency, window),
    }
}

fn occurrence_id(record_id: &str, index: usize) -> String {
    if index == 0 {
        record_id.to_string()
    } else {
        format!("{record_id}-{index}")
    }
}

fn category_or(category: &str, fallback: &str) -> String {
    if category.trim().is_empty() {
        fallback.to_string()
    } else {
        category.to_string()
    }
}

fn income_description(frequency: Frequency) -> String {
    if frequency.is_recurring() {
        format!("{} income", frequency.label())
    } else {
        "One-time income".into()
    }
}

fn bill_description(frequency: Frequency) -> String {
    if frequency.is_recurring() {
        format!("{} bill due", frequency.label())
    } else {
        "Bill due".into()
    }
}
