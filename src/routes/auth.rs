//! Auth routes: simulated login, session status, logout.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::session::{self, Session, Workspace};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "fintrack_session";

/// Browser-session cookie: no `Max-Age`, so it ends when the browser session does.
pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn clear_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated session extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthSession {
    pub session: Session,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar).ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = AppState::from_ref(state);
        let session = app_state
            .sessions()
            .get(token)
            .await
            .filter(|s| s.authenticated)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { session, token: token.to_owned() })
    }
}

impl AuthSession {
    /// Run `f` against this session's workspace.
    ///
    /// # Errors
    ///
    /// `UNAUTHORIZED` if the session ended after extraction.
    pub async fn with_workspace<T>(
        &self,
        state: &AppState,
        f: impl FnOnce(&mut Workspace) -> T,
    ) -> Result<T, StatusCode> {
        state
            .sessions()
            .with_workspace(&self.token, f)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub session: Session,
    pub redirect: &'static str,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user_email: Option<String>,
}

/// `POST /api/auth/login`: wait out the simulated delay, then start a session.
///
/// Dropping the request (client disconnect) cancels the pending login. The
/// session is stored as the last await, so nothing outlives a dropped request.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, StatusCode> {
    let session = state
        .gate
        .login_replacing(&body.email, &body.password, session_token(&jar))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "login did not complete");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let cookie = session_cookie(session.token.clone(), state.config.cookie_secure);
    let jar = jar.add(cookie);
    Ok((jar, Json(LoginResponse { session, redirect: session::DASHBOARD_PATH })))
}

/// `GET /api/auth/session`: report whether the cookie names a live session.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Json<SessionStatus> {
    let session = match session_token(&jar) {
        Some(token) => state.sessions().get(token).await,
        None => None,
    };
    Json(SessionStatus {
        authenticated: session.as_ref().is_some_and(|s| s.authenticated),
        user_email: session.map(|s| s.user_email),
    })
}

/// `POST /api/auth/logout`: drop the session and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = session_token(&jar) {
        state.gate.logout(token).await;
    }
    let jar = jar.add(clear_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
