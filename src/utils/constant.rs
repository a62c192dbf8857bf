//! # Application Constants
//!
//! This module defines configuration constants used throughout the DovvyBuddy service.
//! These constants control the default settings schema and the health check timeouts.

use std::time::Duration;

/// Environment variables that must be present and non-empty at startup.
///
/// The email-delivery key is `BREVO_API_KEY`. Deployments that still carry a
/// different email key name can add it through [`EXTRA_REQUIRED_ENV`].
pub const REQUIRED_ENV: &[&str] = &[
    "DATABASE_URL",
    "GROQ_API_KEY",
    "GOOGLE_AI_API_KEY",
    "BREVO_API_KEY",
    "NEXT_PUBLIC_APP_URL",
    "SESSION_SECRET",
];

/// Colon-separated list of additional required environment variables
///
/// (e.g., "RESEND_API_KEY:SENTRY_DSN")
pub const EXTRA_REQUIRED_ENV: &str = "EXTRA_REQUIRED_ENV";

/// Recommended minimum length of `SESSION_SECRET`
///
/// Shorter secrets are accepted but produce a warning at startup.
pub const SESSION_SECRET_RECOMMENDED_LEN: usize = 32;

pub const DEFAULT_APP_ENV: &str = "development";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Upper bound for a single database probe in the health check
///
/// A probe that has not answered by then marks the database as `error`.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_millis(500);

/// How long the pool waits for a free or fresh connection before giving up
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Maximum number of connections kept by the process-wide pool
pub const DB_MAX_CONNECTIONS: u32 = 5;
