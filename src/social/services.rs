use tracing::{debug, info};

use crate::{
    auth::session::Session,
    error::AppError,
    social::repo::FollowRepo,
    state::AppState,
    users::{repo::UserRepo, repo_types::User},
};

/// Result of a follow request that did not fail.
#[derive(Debug)]
pub enum FollowOutcome {
    Followed(User),
    AlreadyFollowing(User),
}

#[derive(Debug)]
pub enum UnfollowOutcome {
    Unfollowed(User),
    NotFollowing,
}

pub async fn follow(
    state: &AppState,
    session: &Session,
    target_id: i64,
) -> Result<FollowOutcome, AppError> {
    let target = state
        .store
        .find_user(target_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if target.id == session.user_id {
        return Err(AppError::SelfFollow);
    }

    if state.store.is_following(session.user_id, target.id).await? {
        debug!(follower_id = session.user_id, followed_id = target.id, "already following");
        return Ok(FollowOutcome::AlreadyFollowing(target));
    }

    state.store.insert_follow(session.user_id, target.id).await?;
    info!(follower_id = session.user_id, followed_id = target.id, "follow edge created");
    Ok(FollowOutcome::Followed(target))
}

/// Removes the edge if present. Missing edge or missing user is not an error.
pub async fn unfollow(
    state: &AppState,
    session: &Session,
    target_id: i64,
) -> Result<UnfollowOutcome, AppError> {
    let Some(target) = state.store.find_user(target_id).await? else {
        return Ok(UnfollowOutcome::NotFollowing);
    };

    if state.store.delete_follow(session.user_id, target.id).await? == 0 {
        return Ok(UnfollowOutcome::NotFollowing);
    }
    info!(follower_id = session.user_id, followed_id = target.id, "follow edge removed");
    Ok(UnfollowOutcome::Unfollowed(target))
}

pub async fn list_following(state: &AppState, user_id: i64) -> Result<Vec<User>, AppError> {
    ensure_user(state, user_id).await?;
    Ok(state.store.list_following(user_id).await?)
}

pub async fn list_followers(state: &AppState, user_id: i64) -> Result<Vec<User>, AppError> {
    ensure_user(state, user_id).await?;
    Ok(state.store.list_followers(user_id).await?)
}

async fn ensure_user(state: &AppState, user_id: i64) -> Result<(), AppError> {
    match state.store.find_user(user_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
