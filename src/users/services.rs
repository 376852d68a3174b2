use tracing::{info, warn};

use crate::auth::session::Session;
use crate::error::AppError;
use crate::state::AppState;
use crate::users::repo::UserRepo;
use crate::users::repo_types::{ProfileFields, User};

pub async fn get_profile(state: &AppState, user_id: i64) -> Result<User, AppError> {
    state.store.find_user(user_id).await?.ok_or_else(|| {
        warn!(user_id, "profile lookup for unknown user");
        AppError::NotFound("User not found".into())
    })
}

/// The session's own user. A session whose user no longer resolves counts as
/// logged out; store faults pass through untouched.
pub async fn session_user(state: &AppState, session: &Session) -> Result<User, AppError> {
    get_profile(state, session.user_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthenticated,
            other => other,
        })
}

/// Overwrites all six profile fields of the session's own user.
/// Absent fields are cleared, empty strings are stored as-is.
pub async fn update_profile(
    state: &AppState,
    session: &Session,
    profile: &ProfileFields,
) -> Result<User, AppError> {
    let user = state
        .store
        .update_profile(session.user_id, profile)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    info!(user_id = user.id, "profile updated");
    Ok(user)
}
