//! fintrack-domain
//!
//! Pure domain models (Income, Bill, Expense, BalanceAdjustment, ForecastItem).
//! No I/O, no CLI, no storage. Only data types, core enums and date helpers.

pub mod common;
pub mod forecast;
pub mod records;

pub use common::*;
pub use forecast::*;
pub use records::*;
