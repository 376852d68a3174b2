use async_trait::async_trait;

use crate::pulses::repo_types::{FeedRow, Pulse};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait PulseRepo {
    async fn create_pulse(
        &self,
        user_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Pulse, StoreError>;

    async fn find_pulse(&self, id: i64) -> Result<Option<Pulse>, StoreError>;

    /// All parent-less pulses with their authors, newest (highest id) first.
    async fn list_root_pulses(&self) -> Result<Vec<FeedRow>, StoreError>;

    /// Direct updates of a pulse, oldest first.
    async fn list_children(&self, parent_id: i64) -> Result<Vec<Pulse>, StoreError>;
}

#[async_trait]
impl PulseRepo for PgStore {
    async fn create_pulse(
        &self,
        user_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Pulse, StoreError> {
        let pulse = sqlx::query_as::<_, Pulse>(
            r#"
            INSERT INTO pulses (content, user_id, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, user_id, parent_id
            "#,
        )
        .bind(content)
        .bind(user_id)
        .bind(parent_id) // Option<i64> → NULL for root pulses
        .fetch_one(&self.db)
        .await?;
        Ok(pulse)
    }

    async fn find_pulse(&self, id: i64) -> Result<Option<Pulse>, StoreError> {
        let pulse = sqlx::query_as::<_, Pulse>(
            r#"SELECT id, content, user_id, parent_id FROM pulses WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(pulse)
    }

    async fn list_root_pulses(&self) -> Result<Vec<FeedRow>, StoreError> {
        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT p.id, p.content, p.user_id,
                   u.email      AS author_email,
                   u.first_name AS author_first_name,
                   u.last_name  AS author_last_name,
                   (SELECT COUNT(*) FROM pulses c WHERE c.parent_id = p.id) AS update_count
              FROM pulses p
              JOIN users u ON u.id = p.user_id
             WHERE p.parent_id IS NULL
             ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Pulse>, StoreError> {
        let rows = sqlx::query_as::<_, Pulse>(
            r#"
            SELECT id, content, user_id, parent_id
              FROM pulses
             WHERE parent_id = $1
             ORDER BY id ASC
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
