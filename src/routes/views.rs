//! Guarded application shell and panel navigation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::routes::auth::{AuthSession, session_token};
use crate::services::ledger::LedgerSummary;
use crate::services::session::{Access, LOGIN_PATH};
use crate::services::views::Panel;
use crate::state::AppState;

#[derive(Serialize)]
pub struct NavItem {
    pub index: i64,
    pub title: &'static str,
}

#[derive(Serialize)]
pub struct ViewResponse {
    pub active: i64,
    pub panel: Panel,
}

#[derive(Serialize)]
pub struct ShellResponse {
    pub user_email: String,
    #[serde(flatten)]
    pub view: ViewResponse,
    pub navigation: Vec<NavItem>,
    pub summary: LedgerSummary,
}

fn navigation() -> Vec<NavItem> {
    Panel::ALL
        .into_iter()
        .map(|panel| NavItem { index: panel.index(), title: panel.title() })
        .collect()
}

fn stock_redirect(state: &AppState) -> Response {
    Redirect::to(&state.config.stock_dashboard_url).into_response()
}

fn to_login() -> Response {
    Redirect::temporary(LOGIN_PATH).into_response()
}

/// `GET /dashboard`: the application shell. Unauthenticated visitors go to login.
pub async fn dashboard(State(state): State<AppState>, auth: Result<AuthSession, StatusCode>) -> Response {
    let Ok(auth) = auth else {
        return to_login();
    };
    let Ok((active, panel, summary)) = auth
        .with_workspace(&state, |ws| (ws.view.active(), ws.view.panel(), ws.ledger.summary()))
        .await
    else {
        return to_login();
    };

    Json(ShellResponse {
        user_email: auth.session.user_email,
        view: ViewResponse { active, panel },
        navigation: navigation(),
        summary,
    })
    .into_response()
}

/// `GET /api/view`: current panel.
pub async fn current_view(State(state): State<AppState>, auth: AuthSession) -> Result<Json<ViewResponse>, StatusCode> {
    let (active, panel) = auth
        .with_workspace(&state, |ws| (ws.view.active(), ws.view.panel()))
        .await?;
    Ok(Json(ViewResponse { active, panel }))
}

/// `PUT /api/view/{n}`: select a panel. Selecting Stock leaves the app without
/// changing the resting selection.
pub async fn select_view(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(n): Path<i64>,
) -> Result<Response, StatusCode> {
    let panel = auth.with_workspace(&state, |ws| ws.view.set(n)).await?;
    tracing::debug!(selection = n, ?panel, "panel selected");
    if panel.is_external() {
        return Ok(stock_redirect(&state));
    }
    Ok(Json(ViewResponse { active: n, panel }).into_response())
}

/// `GET /stock`: hand off to the external stock dashboard.
pub async fn stock(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state.gate.enter(session_token(&jar), Panel::Stock).await {
        Access::Granted(_) => stock_redirect(&state),
        Access::Redirect(to) => Redirect::temporary(to).into_response(),
    }
}
