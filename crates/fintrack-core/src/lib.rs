//! fintrack-core
//!
//! Cash-flow forecasting services for fintrack.
//! Depends on fintrack-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod error;
pub mod forecast_service;
pub mod recurrence_service;
pub mod remote;
pub mod rollup_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use error::{CoreError, RemoteErrorCode};
pub use forecast_service::*;
pub use recurrence_service::*;
pub use remote::*;
pub use rollup_service::*;
pub use summary_service::*;
