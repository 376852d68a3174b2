use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::StoreError;
use crate::pulses::repo::PulseRepo;
use crate::pulses::repo_types::{FeedRow, Pulse};
use crate::social::repo::FollowRepo;
use crate::users::repo::UserRepo;
use crate::users::repo_types::{NewUser, ProfileFields, User};

/// In-process stand-in for Postgres. Mirrors the schema's constraints:
/// unique email, foreign keys on pulses and follow edges, ids from a
/// per-table sequence starting at 1.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    pulses: Vec<Pulse>,
    followers: Vec<(i64, i64)>,
    next_user_id: i64,
    next_pulse_id: i64,
}

impl Tables {
    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn edge_count(&self, follower_id: i64, followed_id: i64) -> usize {
        self.inner
            .read()
            .await
            .followers
            .iter()
            .filter(|edge| **edge == (follower_id, followed_id))
            .count()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.inner.read().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.user(id).cloned())
    }

    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, StoreError> {
        let mut t = self.inner.write().await;
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            email: new_user.email.to_string(),
            password_hash: new_user.password_hash.to_string(),
            first_name: new_user.first_name.map(str::to_string),
            last_name: new_user.last_name.map(str::to_string),
            bio: None,
            primary_stack: None,
            github_username: None,
            website_url: None,
            date_joined: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        profile: &ProfileFields,
    ) -> Result<Option<User>, StoreError> {
        let mut t = self.inner.write().await;
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.first_name = profile.first_name.clone();
        user.last_name = profile.last_name.clone();
        user.bio = profile.bio.clone();
        user.primary_stack = profile.primary_stack.clone();
        user.github_username = profile.github_username.clone();
        user.website_url = profile.website_url.clone();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl PulseRepo for MemoryStore {
    async fn create_pulse(
        &self,
        user_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Pulse, StoreError> {
        let mut t = self.inner.write().await;
        if t.user(user_id).is_none() {
            return Err(StoreError::MissingReference(format!("user {user_id}")));
        }
        if let Some(pid) = parent_id {
            if !t.pulses.iter().any(|p| p.id == pid) {
                return Err(StoreError::MissingReference(format!("pulse {pid}")));
            }
        }
        t.next_pulse_id += 1;
        let pulse = Pulse {
            id: t.next_pulse_id,
            content: content.to_string(),
            user_id,
            parent_id,
        };
        t.pulses.push(pulse.clone());
        Ok(pulse)
    }

    async fn find_pulse(&self, id: i64) -> Result<Option<Pulse>, StoreError> {
        let t = self.inner.read().await;
        Ok(t.pulses.iter().find(|p| p.id == id).cloned())
    }

    async fn list_root_pulses(&self) -> Result<Vec<FeedRow>, StoreError> {
        let t = self.inner.read().await;
        let mut rows: Vec<FeedRow> = t
            .pulses
            .iter()
            .filter(|p| p.parent_id.is_none())
            .filter_map(|p| {
                let author = t.user(p.user_id)?;
                let update_count = t
                    .pulses
                    .iter()
                    .filter(|c| c.parent_id == Some(p.id))
                    .count() as i64;
                Some(FeedRow {
                    id: p.id,
                    content: p.content.clone(),
                    user_id: p.user_id,
                    author_email: author.email.clone(),
                    author_first_name: author.first_name.clone(),
                    author_last_name: author.last_name.clone(),
                    update_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Pulse>, StoreError> {
        let t = self.inner.read().await;
        let mut rows: Vec<Pulse> = t
            .pulses
            .iter()
            .filter(|p| p.parent_id == Some(parent_id))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }
}

#[async_trait]
impl FollowRepo for MemoryStore {
    async fn is_following(&self, follower_id: i64, followed_id: i64) -> Result<bool, StoreError> {
        let t = self.inner.read().await;
        Ok(t.followers.contains(&(follower_id, followed_id)))
    }

    async fn insert_follow(&self, follower_id: i64, followed_id: i64) -> Result<(), StoreError> {
        let mut t = self.inner.write().await;
        for id in [follower_id, followed_id] {
            if t.user(id).is_none() {
                return Err(StoreError::MissingReference(format!("user {id}")));
            }
        }
        t.followers.push((follower_id, followed_id));
        Ok(())
    }

    async fn delete_follow(&self, follower_id: i64, followed_id: i64) -> Result<u64, StoreError> {
        let mut t = self.inner.write().await;
        let before = t.followers.len();
        t.followers
            .retain(|edge| *edge != (follower_id, followed_id));
        Ok((before - t.followers.len()) as u64)
    }

    async fn list_following(&self, user_id: i64) -> Result<Vec<User>, StoreError> {
        let t = self.inner.read().await;
        let mut ids: Vec<i64> = t
            .followers
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .map(|(_, followed)| *followed)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids.into_iter().filter_map(|id| t.user(id).cloned()).collect())
    }

    async fn list_followers(&self, user_id: i64) -> Result<Vec<User>, StoreError> {
        let t = self.inner.read().await;
        let mut ids: Vec<i64> = t
            .followers
            .iter()
            .filter(|(_, followed)| *followed == user_id)
            .map(|(follower, _)| *follower)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids.into_iter().filter_map(|id| t.user(id).cloned()).collect())
    }
}

/// Store whose every call fails as if the pool were exhausted.
#[derive(Default)]
pub struct UnavailableStore;

fn pool_timed_out() -> StoreError {
    StoreError::Query(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserRepo for UnavailableStore {
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(pool_timed_out())
    }

    async fn find_user(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(pool_timed_out())
    }

    async fn create_user(&self, _new_user: NewUser<'_>) -> Result<User, StoreError> {
        Err(pool_timed_out())
    }

    async fn update_profile(
        &self,
        _id: i64,
        _profile: &ProfileFields,
    ) -> Result<Option<User>, StoreError> {
        Err(pool_timed_out())
    }
}

#[async_trait]
impl PulseRepo for UnavailableStore {
    async fn create_pulse(
        &self,
        _user_id: i64,
        _content: &str,
        _parent_id: Option<i64>,
    ) -> Result<Pulse, StoreError> {
        Err(pool_timed_out())
    }

    async fn find_pulse(&self, _id: i64) -> Result<Option<Pulse>, StoreError> {
        Err(pool_timed_out())
    }

    async fn list_root_pulses(&self) -> Result<Vec<FeedRow>, StoreError> {
        Err(pool_timed_out())
    }

    async fn list_children(&self, _parent_id: i64) -> Result<Vec<Pulse>, StoreError> {
        Err(pool_timed_out())
    }
}

#[async_trait]
impl FollowRepo for UnavailableStore {
    async fn is_following(&self, _follower: i64, _followed: i64) -> Result<bool, StoreError> {
        Err(pool_timed_out())
    }

    async fn insert_follow(&self, _follower: i64, _followed: i64) -> Result<(), StoreError> {
        Err(pool_timed_out())
    }

    async fn delete_follow(&self, _follower: i64, _followed: i64) -> Result<u64, StoreError> {
        Err(pool_timed_out())
    }

    async fn list_following(&self, _user_id: i64) -> Result<Vec<User>, StoreError> {
        Err(pool_timed_out())
    }

    async fn list_followers(&self, _user_id: i64) -> Result<Vec<User>, StoreError> {
        Err(pool_timed_out())
    }
}
