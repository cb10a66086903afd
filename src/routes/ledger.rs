//! Income and expense routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::routes::auth::AuthSession;
use crate::services::ledger::{LedgerError, LedgerSummary, Transaction, TransactionDraft, TransactionKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn ledger_error_to_status(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::MissingFields | LedgerError::InvalidAmount => StatusCode::BAD_REQUEST,
        LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

fn ledger_error_response(err: LedgerError) -> Response {
    (ledger_error_to_status(&err), Json(ErrorBody { error: err.to_string() })).into_response()
}

async fn list(state: AppState, auth: AuthSession, kind: TransactionKind) -> Result<Json<Vec<Transaction>>, StatusCode> {
    let entries = auth.with_workspace(&state, |ws| ws.ledger.list(kind)).await?;
    Ok(Json(entries))
}

async fn add(state: AppState, auth: AuthSession, kind: TransactionKind, draft: TransactionDraft) -> Response {
    match auth.with_workspace(&state, |ws| ws.ledger.add(kind, draft)).await {
        Ok(Ok(tx)) => {
            tracing::info!(id = %tx.id, ?kind, amount = tx.amount, "transaction added");
            (StatusCode::CREATED, Json(tx)).into_response()
        }
        Ok(Err(e)) => ledger_error_response(e),
        Err(status) => status.into_response(),
    }
}

async fn delete(state: AppState, auth: AuthSession, kind: TransactionKind, id: Uuid) -> Response {
    match auth.with_workspace(&state, |ws| ws.ledger.delete(kind, id)).await {
        Ok(Ok(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(e)) => ledger_error_response(e),
        Err(status) => status.into_response(),
    }
}

/// `GET /api/incomes`
pub async fn list_incomes(State(state): State<AppState>, auth: AuthSession) -> Result<Json<Vec<Transaction>>, StatusCode> {
    list(state, auth, TransactionKind::Income).await
}

/// `POST /api/incomes`
pub async fn add_income(State(state): State<AppState>, auth: AuthSession, Json(draft): Json<TransactionDraft>) -> Response {
    add(state, auth, TransactionKind::Income, draft).await
}

/// `DELETE /api/incomes/{id}`
pub async fn delete_income(State(state): State<AppState>, auth: AuthSession, Path(id): Path<Uuid>) -> Response {
    delete(state, auth, TransactionKind::Income, id).await
}

/// `GET /api/expenses`
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<Vec<Transaction>>, StatusCode> {
    list(state, auth, TransactionKind::Expense).await
}

/// `POST /api/expenses`
pub async fn add_expense(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(draft): Json<TransactionDraft>,
) -> Response {
    add(state, auth, TransactionKind::Expense, draft).await
}

/// `DELETE /api/expenses/{id}`
pub async fn delete_expense(State(state): State<AppState>, auth: AuthSession, Path(id): Path<Uuid>) -> Response {
    delete(state, auth, TransactionKind::Expense, id).await
}

/// `GET /api/summary`: totals, balance, recent history, min/max.
pub async fn summary(State(state): State<AppState>, auth: AuthSession) -> Result<Json<LedgerSummary>, StatusCode> {
    let summary = auth.with_workspace(&state, |ws| ws.ledger.summary()).await?;
    Ok(Json(summary))
}
