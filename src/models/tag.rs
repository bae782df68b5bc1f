use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}
