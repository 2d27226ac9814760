#![doc(test(attr(deny(warnings))))]

//! fintrack projects recurring incomes, bills, one-off expenses and balance
//! adjustments into a dated cash-flow forecast with running balances.
//!
//! The forecasting logic lives in the member crates; this crate wires them to
//! configuration, JSON record snapshots and the `fintrack_cli` binary.

pub mod cli;
pub mod errors;
pub mod report;
pub mod utils;

pub use errors::AppError;
pub use fintrack_config::{Config, ConfigManager};
pub use fintrack_core::{
    ForecastInput, ForecastService, ForecastSummary, RecurrencePolicy, SummaryService,
};
pub use fintrack_domain::{ForecastItem, UserRecords};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("fintrack tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
