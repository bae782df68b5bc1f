//! Password-reset token lifecycle.
//!
//! A token moves from issued to either consumed (secret changed, sessions
//! revoked) or purged (found expired). Expiry is detected lazily by the
//! next `verify` or `redeem` call; nothing sweeps the table in the background.

pub mod memory;
pub mod store;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{password, token};
use crate::models::PasswordResetToken;

pub use memory::InMemoryResetStore;
pub use store::{PgResetStore, ResetStore, StoreError};

/// Result of checking a token without redeeming it.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    Valid { user_id: Uuid, email: String },
    /// The token existed but was past its expiry; its row has been deleted.
    Expired,
    NotFound,
}

#[derive(Debug)]
pub enum RedeemError {
    Validation(String),
    TokenInvalid,
    TokenExpired,
    Hash(String),
    Store(StoreError),
}

impl std::fmt::Display for RedeemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedeemError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            RedeemError::TokenInvalid => write!(f, "Reset token invalid"),
            RedeemError::TokenExpired => write!(f, "Reset token expired"),
            RedeemError::Hash(msg) => write!(f, "Password hashing failed: {msg}"),
            RedeemError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl From<StoreError> for RedeemError {
    fn from(err: StoreError) -> Self {
        RedeemError::Store(err)
    }
}

#[derive(Clone)]
pub struct ResetService {
    store: Arc<dyn ResetStore>,
    ttl: Duration,
}

impl ResetService {
    pub fn new(store: Arc<dyn ResetStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh token for the user and return its plaintext value.
    /// Only the hash is persisted. Earlier tokens for the same user stay valid
    /// until they expire or are redeemed.
    pub async fn issue(&self, user_id: Uuid, email: &str) -> Result<String, StoreError> {
        let plaintext = token::generate();
        let record = PasswordResetToken {
            token_hash: token::hash(&plaintext),
            user_id,
            email: email.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        self.store.insert(&record).await?;
        tracing::info!(%user_id, "Password reset token issued");

        Ok(plaintext)
    }

    /// Check a token. An expired token is deleted as part of the check, so a
    /// second call for the same token reports `NotFound`.
    pub async fn verify(&self, token: &str) -> Result<VerifyOutcome, StoreError> {
        let token_hash = token::hash(token);

        let Some(record) = self.store.find(&token_hash).await? else {
            return Ok(VerifyOutcome::NotFound);
        };

        if record.is_expired_at(Utc::now()) {
            self.store.delete(&token_hash).await?;
            tracing::debug!(user_id = %record.user_id, "Purged expired reset token");
            return Ok(VerifyOutcome::Expired);
        }

        Ok(VerifyOutcome::Valid {
            user_id: record.user_id,
            email: record.email,
        })
    }

    /// Consume a token and set a new password for its user.
    ///
    /// The token row is claimed with a delete before any account state
    /// changes; only the caller whose delete removed the row proceeds. If a
    /// later step fails the token stays consumed and a new one must be
    /// requested.
    pub async fn redeem(&self, token: &str, new_password: &str) -> Result<Uuid, RedeemError> {
        if token.is_empty() || new_password.is_empty() {
            return Err(RedeemError::Validation(
                "Token e nova senha são obrigatórios".to_string(),
            ));
        }

        let token_hash = token::hash(token);

        let record = self
            .store
            .find(&token_hash)
            .await?
            .ok_or(RedeemError::TokenInvalid)?;

        if record.is_expired_at(Utc::now()) {
            self.store.delete(&token_hash).await?;
            tracing::debug!(user_id = %record.user_id, "Purged expired reset token");
            return Err(RedeemError::TokenExpired);
        }

        let password_hash = password::hash(new_password).map_err(RedeemError::Hash)?;

        if !self.store.delete(&token_hash).await? {
            tracing::warn!(
                user_id = %record.user_id,
                "Reset token was consumed by a concurrent request"
            );
            return Err(RedeemError::TokenInvalid);
        }

        self.store
            .update_secret(record.user_id, &password_hash)
            .await?;
        let revoked = self
            .store
            .delete_sessions_for_user(record.user_id)
            .await?;

        tracing::info!(user_id = %record.user_id, revoked, "Password reset completed");

        Ok(record.user_id)
    }
}
