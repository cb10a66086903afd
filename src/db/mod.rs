//! Database connection bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup calls `connect` once. A failed or unconfigured connection is
//! logged and the service keeps running without a pool; nothing downstream
//! depends on the database being reachable.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;

/// Connection state surfaced by `/healthz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DbStatus {
    Connected,
    Degraded,
}

impl DbStatus {
    #[must_use]
    pub fn of(pool: Option<&PgPool>) -> Self {
        if pool.is_some() { Self::Connected } else { Self::Degraded }
    }
}

/// Connect to `PostgreSQL` if `DATABASE_URL` is configured.
///
/// Never fails: errors are logged and `None` is returned.
pub async fn connect(config: &AppConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; running without database");
        return None;
    };

    match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!(max_connections = config.db_max_connections, "database connected");
            Some(pool)
        }
        Err(e) => {
            tracing::error!(error = %e, "database connection error; continuing without database");
            None
        }
    }
}
