//! # Health Reporter
//!
//! Builds the report served by `GET /api/health`. Each call is an independent
//! point-in-time probe: no retries, no cached results.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::models::{CheckStatus, HealthChecks, HealthReport};
use crate::services::database::DatabaseProbe;

pub struct HealthReporter {
    database: Option<Arc<dyn DatabaseProbe>>,
    timeout: Duration,
}

impl HealthReporter {
    /// Creates a reporter probing `database` with the given per-probe bound
    /// (the service uses [`HEALTH_CHECK_TIMEOUT`](crate::utils::constant::HEALTH_CHECK_TIMEOUT)).
    ///
    /// Without a database the `database` check is always `unknown`.
    pub fn new(database: Option<Arc<dyn DatabaseProbe>>, timeout: Duration) -> Self {
        Self { database, timeout }
    }

    /// Runs every check and returns the report. Never fails: any probe error is
    /// logged and recorded in the report.
    ///
    /// The `env` check is always `ok`, since the service only starts after the
    /// environment has been validated.
    #[instrument(skip_all)]
    pub async fn check(&self) -> HealthReport {
        let database = match &self.database {
            Some(probe) => self.probe_database(Arc::clone(probe)).await,
            None => CheckStatus::Unknown,
        };

        let checks = HealthChecks {
            env: CheckStatus::Ok,
            database,
        };
        let report = HealthReport::from_checks(checks, OffsetDateTime::now_utc());
        debug!(status = ?report.status, ?checks, "Health check completed");
        report
    }

    /// Runs the probe on its own task so a panicking driver cannot take the
    /// request down with it.
    async fn probe_database(&self, probe: Arc<dyn DatabaseProbe>) -> CheckStatus {
        let handle = tokio::spawn(async move { probe.ping().await });
        let abort = handle.abort_handle();

        match timeout(self.timeout, handle).await {
            Ok(Ok(Ok(()))) => CheckStatus::Ok,
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Database probe failed");
                CheckStatus::Error
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Database probe task failed");
                CheckStatus::Error
            }
            Err(_) => {
                abort.abort();
                warn!(timeout = ?self.timeout, "Database probe timed out");
                CheckStatus::Error
            }
        }
    }
}
