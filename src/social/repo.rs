use async_trait::async_trait;

use crate::store::{PgStore, StoreError};
use crate::users::repo_types::User;

/// Directed follow edges over `followers(follower_id, followed_id)`.
#[async_trait]
pub trait FollowRepo {
    async fn is_following(&self, follower_id: i64, followed_id: i64) -> Result<bool, StoreError>;

    async fn insert_follow(&self, follower_id: i64, followed_id: i64) -> Result<(), StoreError>;

    /// Returns the number of edges removed.
    async fn delete_follow(&self, follower_id: i64, followed_id: i64) -> Result<u64, StoreError>;

    /// Users `user_id` follows, by id.
    async fn list_following(&self, user_id: i64) -> Result<Vec<User>, StoreError>;

    /// Users following `user_id`, by id.
    async fn list_followers(&self, user_id: i64) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
impl FollowRepo for PgStore {
    async fn is_following(&self, follower_id: i64, followed_id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM followers WHERE follower_id = $1 AND followed_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    async fn insert_follow(&self, follower_id: i64, followed_id: i64) -> Result<(), StoreError> {
        sqlx::query(r#"INSERT INTO followers (follower_id, followed_id) VALUES ($1, $2)"#)
            .bind(follower_id)
            .bind(followed_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_follow(&self, follower_id: i64, followed_id: i64) -> Result<u64, StoreError> {
        let done = sqlx::query(
            r#"DELETE FROM followers WHERE follower_id = $1 AND followed_id = $2"#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.db)
        .await?;
        Ok(done.rows_affected())
    }

    async fn list_following(&self, user_id: i64) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT DISTINCT u.id, u.email, u.password_hash, u.first_name, u.last_name, u.bio,
                   u.primary_stack, u.github_username, u.website_url, u.date_joined
              FROM followers f
              JOIN users u ON u.id = f.followed_id
             WHERE f.follower_id = $1
             ORDER BY u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_followers(&self, user_id: i64) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT DISTINCT u.id, u.email, u.password_hash, u.first_name, u.last_name, u.bio,
                   u.primary_stack, u.github_username, u.website_url, u.date_joined
              FROM followers f
              JOIN users u ON u.id = f.follower_id
             WHERE f.followed_id = $1
             ORDER BY u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
