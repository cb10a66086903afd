//! Typed application configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads an optional `.env` file, then builds one `AppConfig` that is
//! shared with every handler through `AppState`. Parsing never fails: unset or
//! malformed values fall back to their defaults.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
pub const DEFAULT_STOCK_DASHBOARD_URL: &str = "http://localhost:8501/";
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Connection string for the database module. `None` runs degraded.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Simulated authentication delay applied to every login.
    pub login_delay: Duration,
    /// Sessions unused for longer than this are discarded.
    pub session_idle_timeout: Duration,
    /// External dashboard the Stock panel redirects to.
    pub stock_dashboard_url: String,
    pub cookie_secure: bool,
    /// Fixed seed for the shared random source; OS entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
            stock_dashboard_url: DEFAULT_STOCK_DASHBOARD_URL.to_owned(),
            cookie_secure: false,
            rng_seed: None,
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: unset means no database connection is attempted
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `LOGIN_DELAY_MS`: default 1500
    /// - `SESSION_IDLE_TIMEOUT_SECS`: default 86400 (one day)
    /// - `STOCK_DASHBOARD_URL`: default `http://localhost:8501/`
    /// - `COOKIE_SECURE`: default false
    /// - `RNG_SEED`: unset means OS entropy
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let stock_dashboard_url = lookup("STOCK_DASHBOARD_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.stock_dashboard_url);

        Self {
            port: parse_or(lookup("PORT"), defaults.port),
            database_url,
            db_max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), defaults.db_max_connections),
            login_delay: Duration::from_millis(parse_or(lookup("LOGIN_DELAY_MS"), DEFAULT_LOGIN_DELAY_MS)),
            session_idle_timeout: Duration::from_secs(parse_or(
                lookup("SESSION_IDLE_TIMEOUT_SECS"),
                DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
            )),
            stock_dashboard_url,
            cookie_secure: lookup("COOKIE_SECURE")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(defaults.cookie_secure),
            rng_seed: lookup("RNG_SEED").and_then(|v| v.trim().parse().ok()),
        }
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
