use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
    #[serde(rename = "link")]
    pub link_url: Option<String>,
    #[serde(rename = "posicao")]
    pub position: i32,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}
