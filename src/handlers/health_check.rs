//! # Health Check Handler
//!
//! Health endpoint for load balancers and monitoring systems. The response
//! distinguishes a healthy service (`200`) from one whose database is not
//! reachable (`503`, status `degraded`).

use std::sync::Arc;

use axum::extract::State;
use tracing::{info, instrument};

use crate::models::{AppState, HealthReport, HealthStatus};

/// Reports service health.
///
/// GET /api/health
///
/// Probes the database once and never fails: probe errors are logged and
/// reported in the body.
///
/// # Returns
///
/// - `200 OK` with `{"status": "ok", ...}` - Database reachable
/// - `503 Service Unavailable` with `{"status": "degraded", ...}` - Database unreachable
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn health_check(State(state): State<Arc<AppState>>) -> HealthReport {
    let report = state.health.check().await;
    if report.status == HealthStatus::Degraded {
        info!(checks = ?report.checks, "Reporting degraded health");
    }
    report
}
