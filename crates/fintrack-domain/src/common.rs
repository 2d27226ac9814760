//! Shared traits, recurrence frequencies, and date utilities for cash-flow records.

use std::fmt;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Exposes the identifier assigned by the document store.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Records that carry a calendar position.
///
/// Returns `None` when the stored date is missing or cannot be parsed; callers
/// skip such records instead of failing.
pub trait Dated {
    fn occurs_at(&self) -> Option<NaiveDateTime>;
}

/// Parses an ISO-8601 date or date-time as stored by the document store.
///
/// Offsets are normalised to UTC; bare calendar dates resolve to midnight.
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.naive_utc());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Unit of a single recurrence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Days(i64),
    Months(u32),
}

impl Cadence {
    /// Advances `from` by `steps` whole cadence units, clamping month ends.
    pub fn advance(self, from: NaiveDateTime, steps: u32) -> Option<NaiveDateTime> {
        match self {
            Cadence::Days(days) => {
                from.checked_add_signed(Duration::days(days.checked_mul(steps as i64)?))
            }
            Cadence::Months(months) => {
                from.checked_add_months(Months::new(months.checked_mul(steps)?))
            }
        }
    }
}

/// Enumerates how often an income (or generic record) repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
}

impl Frequency {
    pub const ALL: [Frequency; 8] = [
        Frequency::Once,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Semiannually,
        Frequency::Annually,
    ];

    pub fn is_recurring(self) -> bool {
        !matches!(self, Frequency::Once)
    }

    /// Step between consecutive occurrences; `None` for one-off records.
    pub fn cadence(self) -> Option<Cadence> {
        match self {
            Frequency::Once => None,
            Frequency::Daily => Some(Cadence::Days(1)),
            Frequency::Weekly => Some(Cadence::Days(7)),
            Frequency::Biweekly => Some(Cadence::Days(14)),
            Frequency::Monthly => Some(Cadence::Months(1)),
            Frequency::Quarterly => Some(Cadence::Months(3)),
            Frequency::Semiannually => Some(Cadence::Months(6)),
            Frequency::Annually => Some(Cadence::Months(12)),
        }
    }

    /// Nominal day length of one step, used when projecting a past anchor forward.
    ///
    /// Calendar-month cadences use fixed approximations (30/91/182/365), so a
    /// projected occurrence may drift from the anchor's day of month.
    pub fn nominal_days(self) -> Option<f64> {
        match self {
            Frequency::Once => None,
            Frequency::Daily => Some(1.0),
            Frequency::Weekly => Some(7.0),
            Frequency::Biweekly => Some(14.0),
            Frequency::Monthly => Some(30.0),
            Frequency::Quarterly => Some(91.0),
            Frequency::Semiannually => Some(182.0),
            Frequency::Annually => Some(365.0),
        }
    }

    pub fn next_after(self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        self.cadence()?.advance(from, 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannually => "Semiannually",
            Frequency::Annually => "Annually",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bill cadences. Bills never repeat daily.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    #[default]
    Once,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
}

impl From<BillFrequency> for Frequency {
    fn from(value: BillFrequency) -> Self {
        match value {
            BillFrequency::Once => Frequency::Once,
            BillFrequency::Weekly => Frequency::Weekly,
            BillFrequency::Biweekly => Frequency::Biweekly,
            BillFrequency::Monthly => Frequency::Monthly,
            BillFrequency::Quarterly => Frequency::Quarterly,
            BillFrequency::Semiannually => Frequency::Semiannually,
            BillFrequency::Annually => Frequency::Annually,
        }
    }
}

impl fmt::Display for BillFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Frequency::from(*self).fmt(f)
    }
}
