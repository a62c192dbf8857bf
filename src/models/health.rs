use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use time::OffsetDateTime;

/// Aggregate status of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// Result of a single subsystem check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
    /// The check was not run (no database configured).
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthChecks {
    pub env: CheckStatus,
    pub database: CheckStatus,
}

/// Point-in-time health report, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub checks: HealthChecks,
}

impl HealthReport {
    /// Builds a report from the subsystem checks. The service is `ok` only when
    /// the database check is `ok`.
    pub fn from_checks(checks: HealthChecks, timestamp: OffsetDateTime) -> Self {
        let status = if checks.database == CheckStatus::Ok {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            timestamp,
            checks,
        }
    }

    /// `200 OK` for a healthy service, `503 Service Unavailable` when degraded.
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
