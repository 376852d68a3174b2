use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::session::Session,
    error::AppError,
    extract::JsonBody,
    state::AppState,
    users::{
        dto::{ProfileResponse, PublicUser},
        repo_types::ProfileFields,
        services::{get_profile, session_user, update_profile},
    },
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/edit_profile", get(show_own_profile).post(edit_profile))
        .route("/users/:id", get(show_profile))
}

#[instrument(skip(state))]
pub async fn show_own_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PublicUser>, AppError> {
    let user = session_user(&state, &session).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn edit_profile(
    State(state): State<AppState>,
    session: Session,
    JsonBody(payload): JsonBody<ProfileFields>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = update_profile(&state, &session, &payload).await?;
    Ok(Json(ProfileResponse {
        user: user.into(),
        notice: "Profile updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn show_profile(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, AppError> {
    let user = get_profile(&state, id).await?;
    Ok(Json(user.into()))
}
