use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::PasswordResetToken;

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {err}"),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Persistence needed by the reset lifecycle: the token table plus the two
/// account-side effects of a redemption.
#[async_trait]
pub trait ResetStore: Send + Sync {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), StoreError>;

    async fn find(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, StoreError>;

    /// Delete the token row. Returns `true` only if this call removed it.
    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError>;

    async fn update_secret(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError>;

    /// Remove every session of the user, returning how many were removed.
    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError>;
}

pub struct PgResetStore {
    pool: PgPool,
}

impl PgResetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetStore for PgResetStore {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), StoreError> {
        db::password_reset_tokens::create(
            &self.pool,
            token.user_id,
            &token.token_hash,
            token.expires_at,
        )
        .await?;
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, StoreError> {
        Ok(db::password_reset_tokens::find_by_hash(&self.pool, token_hash).await?)
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError> {
        let removed = db::password_reset_tokens::delete_by_hash(&self.pool, token_hash).await?;
        Ok(removed == 1)
    }

    async fn update_secret(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let updated = db::users::update_password(&self.pool, user_id, password_hash).await?;
        if updated == 0 {
            return Err(StoreError::Unavailable(format!(
                "User {user_id} no longer exists"
            )));
        }
        Ok(())
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        Ok(db::sessions::delete_all_for_user(&self.pool, user_id).await?)
    }
}
