use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog category.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}
