use async_trait::async_trait;

use crate::store::{PgStore, StoreError};
use crate::users::repo_types::{NewUser, ProfileFields, User};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, bio, \
     primary_stack, github_username, website_url, date_joined";

#[async_trait]
pub trait UserRepo {
    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a user; `date_joined` is stamped by the store.
    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, StoreError>;

    /// Overwrite all profile columns. `None` when the user does not exist.
    async fn update_profile(
        &self,
        id: i64,
        profile: &ProfileFields,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        profile: &ProfileFields,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET first_name = $2,
                   last_name = $3,
                   bio = $4,
                   primary_stack = $5,
                   github_username = $6,
                   website_url = $7
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(profile.first_name.as_deref())
        .bind(profile.last_name.as_deref())
        .bind(profile.bio.as_deref())
        .bind(profile.primary_stack.as_deref())
        .bind(profile.github_username.as_deref())
        .bind(profile.website_url.as_deref())
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}
