use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "admin")]
    pub is_admin: bool,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}
