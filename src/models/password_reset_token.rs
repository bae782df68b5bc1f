use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored reset token joined with the email of the account it belongs to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordResetToken {
    pub token_hash: String,
    pub user_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// A token is usable strictly before its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
