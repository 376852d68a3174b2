use serde::{Deserialize, Serialize};

use crate::pulses::repo_types::{FeedRow, Pulse};
use crate::users::dto::{PublicUser, UserSummary};

#[derive(Debug, Deserialize)]
pub struct CreatePulseRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// One root pulse in the feed.
#[derive(Debug, Serialize)]
pub struct FeedEntry {
    pub id: i64,
    pub content: String,
    pub author: UserSummary,
    pub update_count: i64,
}

impl From<FeedRow> for FeedEntry {
    fn from(r: FeedRow) -> Self {
        Self {
            id: r.id,
            content: r.content,
            author: UserSummary {
                id: r.user_id,
                email: r.author_email,
                first_name: r.author_first_name,
                last_name: r.author_last_name,
            },
            update_count: r.update_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: PublicUser,
    pub pulses: Vec<FeedEntry>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPulseResponse {
    pub pulse: Pulse,
    pub notice: String,
}
