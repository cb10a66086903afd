//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional database pool, the session gate, and the random
//! source used for loan estimates. The random source is injected here so a
//! seeded generator can replace OS entropy.

use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::session::{SessionGate, SessionStore};

/// Random source shared across handlers.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self { inner: Arc::new(Mutex::new(rng)) }
    }

    /// Seeded when `seed` is set, OS entropy otherwise.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(StdRng::seed_from_u64(seed)),
            None => Self::new(StdRng::from_os_rng()),
        }
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when the database is unconfigured or unreachable.
    pub pool: Option<PgPool>,
    pub gate: SessionGate,
    pub rng: SharedRng,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, pool: Option<PgPool>) -> Self {
        let rng = SharedRng::from_seed(config.rng_seed);
        Self::with_rng(config, pool, rng)
    }

    #[must_use]
    pub fn with_rng(config: AppConfig, pool: Option<PgPool>, rng: SharedRng) -> Self {
        let gate = SessionGate::new(SessionStore::new(config.session_idle_timeout), config.login_delay);
        Self { config: Arc::new(config), pool, gate, rng }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        self.gate.store()
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
