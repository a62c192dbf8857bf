//! # Database Client
//!
//! Process-wide PostgreSQL access for the service.
//!
//! ## Implementations
//!
//! - [`LazyPgClient`] - Creates its connection pool on first use and keeps it for
//!   the lifetime of the process
//!
//! The [`DatabaseProbe`] trait is what the health check depends on, so tests can
//! swap in probes that succeed, fail or hang without a running database.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgPool, postgres::PgPoolOptions};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::utils::constant::{DB_ACQUIRE_TIMEOUT, DB_MAX_CONNECTIONS};

/// Errors that can occur while talking to the database
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to create connection pool: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

/// Lightweight, side-effect-free reachability check.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Runs one trivial query against the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] when the pool cannot be created or the query fails
    /// (connection refused, authentication failure, malformed response).
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL client whose pool is created on first use.
///
/// Construction performs no I/O and cannot fail, so a broken `DATABASE_URL`
/// only shows up when the pool is first needed. The pool is stored at most
/// once; concurrent first callers wait for and share the same instance.
pub struct LazyPgClient {
    url: SecretString,
    pool: OnceCell<PgPool>,
}

impl LazyPgClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: SecretString::from(url.into()),
            pool: OnceCell::new(),
        }
    }

    /// Returns the process-wide pool, creating it on the first call.
    ///
    /// Connections themselves are opened lazily by the pool when a query runs.
    pub async fn pool(&self) -> Result<&PgPool, DbError> {
        self.pool
            .get_or_try_init(|| async {
                info!("Creating database connection pool");
                PgPoolOptions::new()
                    .max_connections(DB_MAX_CONNECTIONS)
                    .acquire_timeout(DB_ACQUIRE_TIMEOUT)
                    .connect_lazy(self.url.expose_secret())
                    .map_err(DbError::Connect)
            })
            .await
    }

    /// Whether the pool has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }
}

#[async_trait]
impl DatabaseProbe for LazyPgClient {
    #[instrument(skip_all)]
    async fn ping(&self) -> Result<(), DbError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(DbError::Query)?;
        debug!("Database answered probe");
        Ok(())
    }
}
