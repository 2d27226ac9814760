//! Contract of the remote forecast callable and a local backend that serves it.
//!
//! The remote variant aggregates the same forecast per calendar day. Consumers
//! only depend on the response shape, so the local backend runs the in-process
//! forecaster and rolls the result up instead of reproducing the remote query.

use serde::{Deserialize, Serialize};

use fintrack_domain::{DailyForecastRow, ForecastWindow};

use crate::{
    error::RemoteErrorCode, forecast_service::ForecastService, rollup_service::RollupService,
    storage::RecordSource, time::Clock, CoreError, RecurrencePolicy,
};

/// Longest horizon the callable accepts.
pub const MAX_REMOTE_FORECAST_DAYS: u32 = 365 * 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteForecastRequest {
    pub days_to_forecast: u32,
}

impl RemoteForecastRequest {
    pub fn new(days_to_forecast: u32) -> Self {
        Self { days_to_forecast }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.days_to_forecast == 0 || self.days_to_forecast > MAX_REMOTE_FORECAST_DAYS {
            return Err(CoreError::remote(
                RemoteErrorCode::InvalidArgument,
                format!(
                    "daysToForecast must be between 1 and {MAX_REMOTE_FORECAST_DAYS}, got {}",
                    self.days_to_forecast
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteForecastResponse {
    pub forecast: Vec<DailyForecastRow>,
}

/// Authenticated forecast callable.
///
/// `caller` is the authenticated user id, `None` for anonymous callers.
pub trait RemoteForecastClient {
    fn forecast(
        &self,
        caller: Option<&str>,
        request: &RemoteForecastRequest,
    ) -> Result<RemoteForecastResponse, CoreError>;
}

/// Serves the remote contract from a record source and the local forecaster.
pub struct LocalForecastBackend<S, C> {
    source: S,
    clock: C,
    policy: RecurrencePolicy,
}

impl<S: RecordSource, C: Clock> LocalForecastBackend<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            policy: RecurrencePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RecurrencePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<S: RecordSource, C: Clock> RemoteForecastClient for LocalForecastBackend<S, C> {
    fn forecast(
        &self,
        caller: Option<&str>,
        request: &RemoteForecastRequest,
    ) -> Result<RemoteForecastResponse, CoreError> {
        let user_id = caller
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| {
                CoreError::remote(
                    RemoteErrorCode::Unauthenticated,
                    "The function must be called while authenticated.",
                )
            })?;
        request.validate()?;

        let records = self.source.load_records(user_id).map_err(|err| match err {
            CoreError::Remote { .. } => err,
            other => {
                tracing::warn!(user_id, error = %other, "remote forecast could not load records");
                CoreError::remote(
                    RemoteErrorCode::Internal,
                    format!("Error generating forecast: {other}"),
                )
            }
        })?;

        let start = self.clock.now_naive();
        let days = request.days_to_forecast;
        let items = ForecastService::generate_for_records(&records, start, days, self.policy);
        let forecast = RollupService::daily(&items, ForecastWindow::new(start, days));
        tracing::info!(user_id, days, rows = forecast.len(), "remote forecast served");
        Ok(RemoteForecastResponse { forecast })
    }
}

/// Checks that two responses describe the same days with well-formed figures.
///
/// Values are not compared; implementations of the callable may round or
/// aggregate differently.
pub fn same_shape(left: &RemoteForecastResponse, right: &RemoteForecastResponse) -> bool {
    left.forecast.len() == right.forecast.len()
        && left
            .forecast
            .iter()
            .zip(&right.forecast)
            .all(|(a, b)| a.date == b.date && row_is_finite(a) && row_is_finite(b))
}

fn row_is_finite(row: &DailyForecastRow) -> bool {
    [row.income, row.expenses, row.net_change, row.balance]
        .iter()
        .all(|value| value.is_finite())
}
