//! Session store and login gate.
//!
//! ARCHITECTURE
//! ============
//! Sessions are keyed by a random token carried in an `HttpOnly` cookie and
//! kept in memory; each owns a `Workspace` holding the view selection, card
//! form, last loan assessment and ledger. The store is shared through
//! `AppState`, never through globals.
//!
//! LOGIN
//! =====
//! Credentials are not checked: every login succeeds after a fixed delay.
//! The delayed completion runs on a spawned task owned by `PendingLogin`,
//! which aborts the task when dropped. The task only builds the `Session`;
//! the caller's future stores it once the wait resolves, so a caller that
//! goes away at any point before that never leaves a session behind.
//!
//! EXPIRY
//! ======
//! Cookies carry no `Max-Age`, so the server cannot tell when a browser
//! session ends. Entries idle for longer than the store's timeout are treated
//! as gone: lookups evict them and every insert sweeps the map.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::services::card::CardInputState;
use crate::services::ledger::Ledger;
use crate::services::loan::LoanAssessment;
use crate::services::views::{Panel, ViewSelection};

/// Where unauthenticated navigation is sent.
pub const LOGIN_PATH: &str = "/";
/// Where a completed login navigates to.
pub const DASHBOARD_PATH: &str = "/dashboard";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token (OS-seeded thread RNG).
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("login cancelled before completion")]
    Cancelled,
    #[error("login task failed: {0}")]
    Task(String),
}

/// Client-visible record of a logged-in browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(skip)]
    pub token: String,
    pub authenticated: bool,
    pub user_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Session {
    fn new(user_email: String) -> Self {
        Self { token: generate_token(), authenticated: true, user_email, created_at: OffsetDateTime::now_utc() }
    }
}

/// Per-session view state.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub view: ViewSelection,
    pub card: CardInputState,
    /// Overwritten on every assessment.
    pub assessment: Option<LoanAssessment>,
    pub ledger: Ledger,
}

struct SessionEntry {
    session: Session,
    workspace: Workspace,
    last_seen: Instant,
}

/// Outcome of guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted(Panel),
    Redirect(&'static str),
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `idle_timeout` without use.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self { inner: Arc::default(), idle_timeout }
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) > self.idle_timeout
    }

    /// Store `session`, replacing `previous` in the same write.
    async fn insert(&self, session: Session, previous: Option<&str>) {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        if let Some(previous) = previous {
            sessions.remove(previous);
        }
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "expired idle sessions");
        }
        let entry = SessionEntry { session: session.clone(), workspace: Workspace::default(), last_seen: now };
        sessions.insert(session.token, entry);
    }

    /// Fetch a live entry, evicting it if idle too long and touching it otherwise.
    fn live<'a>(&self, sessions: &'a mut HashMap<String, SessionEntry>, token: &str) -> Option<&'a mut SessionEntry> {
        let now = Instant::now();
        if sessions.get(token).is_some_and(|entry| self.is_expired(entry, now)) {
            sessions.remove(token);
            return None;
        }
        let entry = sessions.get_mut(token)?;
        entry.last_seen = now;
        Some(entry)
    }

    /// Look up a session by token.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.inner.write().await;
        self.live(&mut sessions, token).map(|entry| entry.session.clone())
    }

    /// Whether `token` names a live, authenticated session.
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        let mut sessions = self.inner.write().await;
        self.live(&mut sessions, token).is_some_and(|entry| entry.session.authenticated)
    }

    /// Remove a session, returning it if it existed.
    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.inner
            .write()
            .await
            .remove(token)
            .map(|entry| entry.session)
    }

    /// Run `f` against the session's workspace. `None` if the session is gone.
    pub async fn with_workspace<T>(&self, token: &str, f: impl FnOnce(&mut Workspace) -> T) -> Option<T> {
        let mut sessions = self.inner.write().await;
        self.live(&mut sessions, token).map(|entry| f(&mut entry.workspace))
    }

    /// Number of stored sessions, including idle ones not yet swept.
    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

// =============================================================================
// GATE
// =============================================================================

/// Login completion scheduled on a background task.
///
/// Dropping it aborts the task. Nothing is stored until the session is
/// handed back through [`SessionGate::login`].
#[must_use = "dropping a PendingLogin cancels it"]
pub struct PendingLogin {
    handle: JoinHandle<Session>,
}

impl PendingLogin {
    /// Wait for the login to complete.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the task was aborted and `Task` if it panicked.
    pub async fn wait(mut self) -> Result<Session, SessionError> {
        (&mut self.handle).await.map_err(|e| {
            if e.is_cancelled() { SessionError::Cancelled } else { SessionError::Task(e.to_string()) }
        })
    }
}

impl Drop for PendingLogin {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
pub struct SessionGate {
    store: SessionStore,
    delay: Duration,
}

impl SessionGate {
    #[must_use]
    pub fn new(store: SessionStore, delay: Duration) -> Self {
        Self { store, delay }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Schedule a login. Any email and password are accepted.
    pub fn begin_login(&self, email: &str, _password: &str) -> PendingLogin {
        let delay = self.delay;
        let email = email.to_owned();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Session::new(email)
        });
        PendingLogin { handle }
    }

    /// Log in and wait for the simulated delay.
    ///
    /// # Errors
    ///
    /// Only fails if the login task is cancelled or panics.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        self.login_replacing(email, password, None).await
    }

    /// Log in, ending the `previous` session once the new one is stored.
    ///
    /// # Errors
    ///
    /// Only fails if the login task is cancelled or panics.
    pub async fn login_replacing(
        &self,
        email: &str,
        password: &str,
        previous: Option<&str>,
    ) -> Result<Session, SessionError> {
        let session = self.begin_login(email, password).wait().await?;
        self.store.insert(session.clone(), previous).await;
        tracing::info!(user_email = %session.user_email, "session authenticated");
        Ok(session)
    }

    /// Resolve guarded navigation to `panel`.
    pub async fn enter(&self, token: Option<&str>, panel: Panel) -> Access {
        if self.store.is_authenticated(token).await {
            Access::Granted(panel)
        } else {
            Access::Redirect(LOGIN_PATH)
        }
    }

    /// End a session. Returns whether one existed.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.store.remove(token).await;
        if let Some(session) = &removed {
            tracing::info!(user_email = %session.user_email, "session ended");
        }
        removed.is_some()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
