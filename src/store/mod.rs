use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::pulses::repo::PulseRepo;
use crate::social::repo::FollowRepo;
use crate::users::repo::UserRepo;

#[cfg(test)]
pub mod memory;

#[cfg(test)]
pub use memory::{MemoryStore, UnavailableStore};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("dangling reference: {0}")]
    MissingReference(String),

    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return Self::UniqueViolation(db.message().to_string()),
                Some(FOREIGN_KEY_VIOLATION) => {
                    return Self::MissingReference(db.message().to_string())
                }
                _ => {}
            }
        }
        Self::Query(e)
    }
}

/// Everything the services need from persistence.
pub trait Store: UserRepo + PulseRepo + FollowRepo + Send + Sync + 'static {}

impl<T> Store for T where T: UserRepo + PulseRepo + FollowRepo + Send + Sync + 'static {}

/// Postgres-backed store. The repository traits are implemented next to
/// their domain module (`users::repo`, `pulses::repo`, `social::repo`).
#[derive(Clone)]
pub struct PgStore {
    pub(crate) db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    /// Applies the embedded `migrations/`. The schema must be in place before
    /// serving, so any failure here aborts startup.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        info!("migrations applied");
        Ok(())
    }
}
