use tracing::{debug, info, warn};

use crate::{
    auth::session::Session,
    error::AppError,
    pulses::{dto::FeedEntry, repo::PulseRepo, repo_types::Pulse},
    state::AppState,
};

/// Posts a pulse for the session user. A `parent_id` that names an existing
/// pulse makes the new one an update under it; any other `parent_id` yields a
/// root pulse. The parent may belong to any author.
pub async fn create_pulse(
    state: &AppState,
    session: &Session,
    content: Option<&str>,
    parent_id: Option<i64>,
) -> Result<Pulse, AppError> {
    let content = match content {
        Some(c) if !c.trim().is_empty() => c,
        _ => {
            warn!(user_id = session.user_id, "empty pulse rejected");
            return Err(AppError::validation("Pulse content cannot be empty", "/dashboard"));
        }
    };

    let parent_id = match parent_id {
        Some(pid) => {
            let parent = state.store.find_pulse(pid).await?;
            if parent.is_none() {
                debug!(parent_id = pid, "parent pulse not found; posting as root");
            }
            parent.map(|p| p.id)
        }
        None => None,
    };

    let pulse = state
        .store
        .create_pulse(session.user_id, content, parent_id)
        .await?;
    info!(
        pulse_id = pulse.id,
        user_id = pulse.user_id,
        parent_id = ?pulse.parent_id,
        "pulse created"
    );
    Ok(pulse)
}

/// Every root pulse across all users, newest first. Updates never appear here.
pub async fn list_feed(state: &AppState) -> Result<Vec<FeedEntry>, AppError> {
    let rows = state.store.list_root_pulses().await?;
    Ok(rows.into_iter().map(FeedEntry::from).collect())
}

/// Updates posted under `pulse_id`, oldest first.
pub async fn list_updates(state: &AppState, pulse_id: i64) -> Result<Vec<Pulse>, AppError> {
    if state.store.find_pulse(pulse_id).await?.is_none() {
        return Err(AppError::NotFound("Pulse not found".into()));
    }
    Ok(state.store.list_children(pulse_id).await?)
}
