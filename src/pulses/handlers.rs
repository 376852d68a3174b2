use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::session::Session,
    error::AppError,
    extract::JsonBody,
    pulses::{
        dto::{CreatePulseRequest, CreatedPulseResponse, DashboardResponse},
        repo_types::Pulse,
        services::{create_pulse, list_feed, list_updates},
    },
    state::AppState,
    users::services::session_user,
};

pub fn pulse_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard).post(post_pulse))
        .route("/pulses/:id/updates", get(pulse_updates))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = session_user(&state, &session).await?;
    let pulses = list_feed(&state).await?;
    Ok(Json(DashboardResponse {
        user: user.into(),
        pulses,
    }))
}

#[instrument(skip(state, payload))]
pub async fn post_pulse(
    State(state): State<AppState>,
    session: Session,
    JsonBody(payload): JsonBody<CreatePulseRequest>,
) -> Result<(StatusCode, Json<CreatedPulseResponse>), AppError> {
    let pulse = create_pulse(
        &state,
        &session,
        payload.content.as_deref(),
        payload.parent_id,
    )
    .await?;
    let notice = if pulse.parent_id.is_some() {
        "Milestone updated"
    } else {
        "New Milestone created!"
    };
    Ok((
        StatusCode::CREATED,
        Json(CreatedPulseResponse {
            pulse,
            notice: notice.into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn pulse_updates(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Pulse>>, AppError> {
    Ok(Json(list_updates(&state, id).await?))
}
