use std::collections::{HashMap, HashSet};

use fintrack_domain::{Amounted, Dated, Identifiable, NamedEntity, UserRecords};

use crate::CoreError;

/// Read-only access to the per-user records kept by the document store.
pub trait RecordSource: Send + Sync {
    fn load_records(&self, user_id: &str) -> Result<UserRecords, CoreError>;
    fn list_users(&self) -> Result<Vec<String>, CoreError>;
}

/// Record source held entirely in memory, keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    records: HashMap<String, UserRecords>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, records: UserRecords) {
        self.records.insert(records.user_id.clone(), records);
    }

    pub fn with_records(mut self, records: UserRecords) -> Self {
        self.insert(records);
        self
    }
}

impl RecordSource for InMemoryRecordSource {
    fn load_records(&self, user_id: &str) -> Result<UserRecords, CoreError> {
        self.records
            .get(user_id)
            .cloned()
            .ok_or_else(|| CoreError::RecordsNotFound(user_id.to_string()))
    }

    fn list_users(&self) -> Result<Vec<String>, CoreError> {
        let mut users: Vec<String> = self.records.keys().cloned().collect();
        users.sort();
        Ok(users)
    }
}

/// Detects records the forecaster will skip or reinterpret.
pub fn record_warnings(records: &UserRecords) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    let mut inspect = |kind: &str, record: &dyn RecordView, sign: SignRule| {
        let id = record.id();
        let label = match record.name().trim() {
            "" => format!("{kind} {id}"),
            name => format!("{kind} {id} ({name})"),
        };
        if !seen.insert(format!("{kind}:{id}")) {
            warnings.push(format!("{label} appears more than once"));
        }
        if record.occurs_at().is_none() {
            warnings.push(format!("{label} has no usable date and will be skipped"));
        }
        if !record.amount().is_finite() {
            warnings.push(format!("{label} has a non-finite amount"));
        } else if record.amount() < 0.0 {
            match sign {
                SignRule::Inflow => warnings.push(format!(
                    "{label} stores a negative amount; it is treated as an inflow"
                )),
                SignRule::Outflow => warnings.push(format!(
                    "{label} stores a negative amount; it is treated as an outflow"
                )),
                SignRule::Signed => {}
            }
        }
    };

    for income in &records.incomes {
        inspect("income", income, SignRule::Inflow);
    }
    for bill in &records.bills {
        inspect("bill", bill, SignRule::Outflow);
    }
    for expense in &records.expenses {
        inspect("expense", expense, SignRule::Outflow);
    }
    for adjustment in &records.adjustments {
        inspect("adjustment", adjustment, SignRule::Signed);
    }
    warnings
}

#[derive(Clone, Copy)]
enum SignRule {
    Inflow,
    Outflow,
    Signed,
}

trait RecordView: Identifiable + NamedEntity + Amounted + Dated {}

impl<T: Identifiable + NamedEntity + Amounted + Dated> RecordView for T {}
