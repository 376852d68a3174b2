use serde::Serialize;
use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub primary_stack: Option<String>,
    pub github_username: Option<String>,
    pub website_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_joined: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            bio: u.bio,
            primary_stack: u.primary_stack,
            github_username: u.github_username,
            website_url: u.website_url,
            date_joined: u.date_joined,
        }
    }
}

/// Short form used for pulse authors and follow lists.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Response after a profile edit.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    pub notice: String,
}
