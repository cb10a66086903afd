//! Loan assessment and card form routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::routes::auth::AuthSession;
use crate::services::card::{CardDisplay, CardInputState, CardUpdate};
use crate::services::loan::{self, AssessmentView};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CardResponse {
    pub input: CardInputState,
    pub display: CardDisplay,
}

impl From<CardInputState> for CardResponse {
    fn from(input: CardInputState) -> Self {
        let display = input.display();
        Self { input, display }
    }
}

/// `POST /api/credit/assessment`: draw a new assessment, replacing the last one.
pub async fn assess(State(state): State<AppState>, auth: AuthSession) -> Result<Json<AssessmentView>, StatusCode> {
    let assessment = state.rng.with(|rng| loan::assess(rng));
    let stored = assessment.clone();
    auth.with_workspace(&state, move |ws| ws.assessment = Some(stored))
        .await?;

    tracing::info!(
        credit_score = assessment.credit_score,
        eligible = assessment.eligible,
        "loan assessment generated"
    );
    Ok(Json(state.rng.with(|rng| assessment.render(rng))))
}

/// `GET /api/credit/assessment`: re-render the last assessment.
pub async fn last_assessment(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<AssessmentView>, StatusCode> {
    let assessment = auth
        .with_workspace(&state, |ws| ws.assessment.clone())
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(state.rng.with(|rng| assessment.render(rng))))
}

/// `GET /api/credit/card`: current card form values.
pub async fn card(State(state): State<AppState>, auth: AuthSession) -> Result<Json<CardResponse>, StatusCode> {
    let input = auth.with_workspace(&state, |ws| ws.card.clone()).await?;
    Ok(Json(input.into()))
}

/// `PATCH /api/credit/card`: apply edits through the field masks.
pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(update): Json<CardUpdate>,
) -> Result<Json<CardResponse>, StatusCode> {
    let input = auth
        .with_workspace(&state, move |ws| {
            ws.card.apply(update);
            ws.card.clone()
        })
        .await?;
    Ok(Json(input.into()))
}
