use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Pulse record in the database. `parent_id` set means this pulse is an
/// update posted under another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Pulse {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub parent_id: Option<i64>,
}

/// Root pulse joined with its author, as read for the feed.
#[derive(Debug, Clone, FromRow)]
pub struct FeedRow {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub author_email: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub update_count: i64,
}
