use chrono::{DateTime, NaiveDateTime, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
///
/// Forecasting functions never consult a clock; only outer surfaces (CLI, the
/// local remote-contract backend) resolve "now" through one.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC instant without offset. Defaults to `now().naive_utc()`.
    fn now_naive(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

/// Wall-clock implementation backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: NaiveDateTime) -> Self {
        Self(DateTime::from_naive_utc_and_offset(instant, Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
