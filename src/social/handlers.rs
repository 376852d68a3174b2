use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::session::Session,
    error::AppError,
    social::{
        dto::FollowResponse,
        services::{self, FollowOutcome, UnfollowOutcome},
    },
    state::AppState,
    users::dto::UserSummary,
};

pub fn social_routes() -> Router<AppState> {
    Router::new()
        .route("/follow/:id", get(follow))
        .route("/unfollow/:id", get(unfollow))
        .route("/users/:id/following", get(following))
        .route("/users/:id/followers", get(followers))
}

#[instrument(skip(state))]
pub async fn follow(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<FollowResponse>, AppError> {
    let resp = match services::follow(&state, &session, id).await? {
        FollowOutcome::Followed(user) => FollowResponse {
            notice: format!("You are now following {}!", user.display_name()),
            following: true,
        },
        FollowOutcome::AlreadyFollowing(_) => FollowResponse {
            notice: "You are already following this user".into(),
            following: true,
        },
    };
    Ok(Json(resp))
}

#[instrument(skip(state))]
pub async fn unfollow(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<FollowResponse>, AppError> {
    let notice = match services::unfollow(&state, &session, id).await? {
        UnfollowOutcome::Unfollowed(user) => {
            format!("You stopped following {}.", user.display_name())
        }
        UnfollowOutcome::NotFollowing => "You are not following this user".into(),
    };
    Ok(Json(FollowResponse {
        notice,
        following: false,
    }))
}

#[instrument(skip(state))]
pub async fn following(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = services::list_following(&state, id).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

#[instrument(skip(state))]
pub async fn followers(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = services::list_followers(&state, id).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}
