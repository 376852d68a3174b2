use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, NoticeResponse, RegisterRequest},
        services,
        session::{MaybeSession, SessionKeys},
    },
    error::AppError,
    extract::JsonBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = services::register(&state, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            notice: "Account created! Tell us more about yourself in your profile.".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = services::login(&state, &payload).await?;
    let cookie = SessionKeys::from_ref(&state).session_cookie(&token);
    let notice = format!(
        "Welcome back, {}!",
        user.first_name.as_deref().unwrap_or_default()
    );
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: user.into(),
            notice,
        }),
    ))
}

/// Clears the session cookie. Works the same with or without a session.
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> impl IntoResponse {
    if let Some(s) = session {
        info!(user_id = s.user_id, "user logged out");
    }
    (
        [(header::SET_COOKIE, SessionKeys::from_ref(&state).cleared_cookie())],
        Json(NoticeResponse {
            notice: "Logged out successfully".into(),
        }),
    )
}

pub async fn home(MaybeSession(session): MaybeSession) -> Redirect {
    match session {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}
