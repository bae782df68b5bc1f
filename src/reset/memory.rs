use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::store::{ResetStore, StoreError};
use crate::models::PasswordResetToken;

/// Process-local store for tests and local experiments.
///
/// Token removal goes through `DashMap::remove`, so concurrent deletes of the
/// same hash see exactly one winner, matching the row-count check of the
/// Postgres store.
#[derive(Default)]
pub struct InMemoryResetStore {
    tokens: DashMap<String, PasswordResetToken>,
    secrets: DashMap<Uuid, String>,
    sessions: DashMap<Uuid, u64>,
}

impl InMemoryResetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token_hash: &str) -> bool {
        self.tokens.contains_key(token_hash)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn secret_for(&self, user_id: Uuid) -> Option<String> {
        self.secrets.get(&user_id).map(|s| s.value().clone())
    }

    pub fn add_session(&self, user_id: Uuid) {
        *self.sessions.entry(user_id).or_insert(0) += 1;
    }

    pub fn session_count(&self, user_id: Uuid) -> u64 {
        self.sessions.get(&user_id).map(|c| *c.value()).unwrap_or(0)
    }
}

#[async_trait]
impl ResetStore for InMemoryResetStore {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), StoreError> {
        self.tokens.insert(token.token_hash.clone(), token.clone());
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, StoreError> {
        Ok(self.tokens.get(token_hash).map(|t| t.value().clone()))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(self.tokens.remove(token_hash).is_some())
    }

    async fn update_secret(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.secrets.insert(user_id, password_hash.to_string());
        Ok(())
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        Ok(self.sessions.remove(&user_id).map(|(_, n)| n).unwrap_or(0))
    }
}
