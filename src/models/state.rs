use std::sync::Arc;

use tracing::info;

use crate::services::{database::DatabaseProbe, health::HealthReporter};
use crate::utils::constant::HEALTH_CHECK_TIMEOUT;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Reporter behind `GET /api/health`.
    pub health: HealthReporter,
}

impl AppState {
    /// Creates the application state around an optional database handle.
    ///
    /// # Arguments
    ///
    /// * `database` - Process-wide database client, probed by the health check.
    ///   `None` leaves the database check `unknown`.
    pub fn new(database: Option<Arc<dyn DatabaseProbe>>) -> Self {
        info!(
            database = database.is_some(),
            "Initializing application state"
        );

        Self::with_reporter(HealthReporter::new(database, HEALTH_CHECK_TIMEOUT))
    }

    /// Creates the application state around a pre-built health reporter.
    pub fn with_reporter(health: HealthReporter) -> Self {
        Self { health }
    }
}
