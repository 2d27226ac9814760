//! Stored cash-flow records as returned by the document store.
//!
//! Field names follow the store's camelCase JSON. Dates stay as the raw
//! strings the store returned and are parsed on demand through [`Dated`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Income {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            date: Some(date.into()),
            frequency,
            category: "Income".into(),
            is_recurring: frequency.is_recurring(),
        }
    }

    /// Frequency honoured by recurrence expansion. A record flagged as
    /// non-recurring behaves as a one-off whatever its stored frequency.
    pub fn effective_frequency(&self) -> Frequency {
        if self.is_recurring {
            self.frequency
        } else {
            Frequency::Once
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub frequency: BillFrequency,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub category: String,
}

impl Bill {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        due_date: impl Into<String>,
        frequency: BillFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            due_date: Some(due_date.into()),
            frequency,
            is_paid: false,
            category: "Bills".into(),
        }
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            date: Some(date.into()),
            category: "Expenses".into(),
        }
    }
}

/// Manual correction to the projected balance; its signed amount is used as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAdjustment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub reason: String,
}

impl BalanceAdjustment {
    pub fn new(amount: f64, date: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Some(date.into()),
            amount,
            reason: reason.into(),
        }
    }
}

/// Everything the forecaster reads for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecords {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub starting_balance: f64,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub adjustments: Vec<BalanceAdjustment>,
}

impl UserRecords {
    pub fn new(user_id: impl Into<String>, starting_balance: f64) -> Self {
        Self {
            user_id: user_id.into(),
            starting_balance,
            ..Self::default()
        }
    }

    pub fn record_count(&self) -> usize {
        self.incomes.len() + self.bills.len() + self.expenses.len() + self.adjustments.len()
    }
}

macro_rules! impl_record_traits {
    ($ty:ty, $date:ident) => {
        impl Identifiable for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Amounted for $ty {
            fn amount(&self) -> f64 {
                self.amount
            }
        }

        impl Dated for $ty {
            fn occurs_at(&self) -> Option<NaiveDateTime> {
                self.$date.as_deref().and_then(parse_record_date)
            }
        }
    };
}

impl_record_traits!(Income, date);
impl_record_traits!(Bill, due_date);
impl_record_traits!(Expense, date);
impl_record_traits!(BalanceAdjustment, date);

impl NamedEntity for Income {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntity for Bill {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntity for BalanceAdjustment {
    fn name(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_documents() {
        let raw = r#"{
            "id": "b1",
            "name": "Rent",
            "amount": 1200,
            "dueDate": "2025-02-01",
            "frequency": "monthly",
            "isPaid": false,
            "category": "Housing"
        }"#;
        let bill: Bill = serde_json::from_str(raw).unwrap();
        assert_eq!(bill.frequency, BillFrequency::Monthly);
        assert!(!bill.is_paid);
        assert!(bill.occurs_at().is_some());
    }

    #[test]
    fn missing_dates_deserialize_to_none() {
        let raw = r#"{ "id": "e1", "name": "Coffee", "amount": 4.5 }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.date, None);
        assert_eq!(expense.occurs_at(), None);
    }

    #[test]
    fn non_recurring_income_is_treated_as_once() {
        let mut income = Income::new("Salary", 3000.0, "2025-01-15", Frequency::Monthly);
        assert_eq!(income.effective_frequency(), Frequency::Monthly);
        income.is_recurring = false;
        assert_eq!(income.effective_frequency(), Frequency::Once);
    }

    #[test]
    fn user_records_default_to_empty_collections() {
        let records: UserRecords = serde_json::from_str(r#"{ "userId": "u1" }"#).unwrap();
        assert_eq!(records.user_id, "u1");
        assert_eq!(records.record_count(), 0);
        assert_eq!(records.starting_balance, 0.0);
    }
}
