//! # DovvyBuddy - AI Diving Assistant Starter Service
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for the landing page and health check
//! - [`models`] - Shared state and response types
//! - [`services`] - Database client and health reporting
//! - [`utils`] - Environment validation, constants and telemetry

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{Router, handler::HandlerWithoutStateExt, routing::get};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::handlers::{health_check, landing_page, not_found};
use crate::models::AppState;
use crate::services::database::{DatabaseProbe, LazyPgClient};
use crate::utils::config::Config;

/// Directory served under `/static`, relative to the working directory.
pub const STATIC_DIR: &str = "static";

/// Creates an Axum router wired from a validated configuration.
///
/// The database client is created here but does not connect until the first
/// health check needs it, so an unreachable database never blocks startup.
pub fn app_from_config(config: &Config) -> Router {
    let database = match config.database_url() {
        Some(url) => {
            info!("Database client registered, pool will be created on first use");
            Some(Arc::new(LazyPgClient::new(url)) as Arc<dyn DatabaseProbe>)
        }
        None => {
            warn!("No DATABASE_URL configured, database health will be reported as unknown");
            None
        }
    };

    app(Arc::new(AppState::new(database)))
}

/// Creates an Axum router with application routes and state.
///
/// # Routes
///
/// - `GET /` - Landing page
/// - `GET /api/health` - Health report (`200` ok, `503` degraded)
/// - `/static/*` - Files from [`STATIC_DIR`]
///
/// Every other path, including missing static files, answers `404` with a JSON
/// error body.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/api/health", get(health_check))
        .nest_service(
            "/static",
            ServeDir::new(STATIC_DIR).not_found_service(not_found.into_service()),
        )
        .fallback(not_found)
        .with_state(state)
}
