//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API, the guarded application shell at
//! `/dashboard`, and the external stock hand-off under a single Axum router.
//! Anything that needs a session goes through the `AuthSession` extractor or
//! the session gate.

pub mod auth;
pub mod credit;
pub mod ledger;
pub mod views;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::DbStatus;
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/dashboard", get(views::dashboard))
        .route("/stock", get(views::stock))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/session", get(auth::status))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/view", get(views::current_view))
        .route("/api/view/{n}", put(views::select_view))
        .route(
            "/api/credit/assessment",
            get(credit::last_assessment).post(credit::assess),
        )
        .route("/api/credit/card", get(credit::card).patch(credit::update_card))
        .route("/api/incomes", get(ledger::list_incomes).post(ledger::add_income))
        .route("/api/incomes/{id}", delete(ledger::delete_income))
        .route("/api/expenses", get(ledger::list_expenses).post(ledger::add_expense))
        .route("/api/expenses/{id}", delete(ledger::delete_expense))
        .route("/api/summary", get(ledger::summary))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: DbStatus,
    sessions: usize,
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        database: DbStatus::of(state.pool.as_ref()),
        sessions: state.sessions().count().await,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

#[cfg(test)]
#[path = "harness_test.rs"]
pub(crate) mod harness;
