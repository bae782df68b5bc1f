use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::Tag;
use crate::slug::{slugify, unique_slug};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct TagRequest {
    #[serde(default)]
    pub nome: String,
}

impl TagRequest {
    fn name(&self) -> Result<&str, AppError> {
        let name = self.nome.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Nome da tag é obrigatório".to_string()));
        }
        Ok(name)
    }
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = db::tags::list(&state.pool).await?;
    Ok(Json(tags))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<TagRequest>,
) -> Result<Json<Tag>, AppError> {
    auth.require_admin()?;
    let name = req.name()?;

    let pool = &state.pool;
    let slug = unique_slug(&slugify(name), |candidate| async move {
        db::tags::slug_taken(pool, &candidate, None).await
    })
    .await?;

    let tag = db::tags::create(pool, name, &slug)
        .await
        .map_err(slug_conflict)?;
    tracing::info!(tag_id = %tag.id, slug = %tag.slug, "Tag created");

    Ok(Json(tag))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<TagRequest>,
) -> Result<Json<Tag>, AppError> {
    auth.require_admin()?;
    let name = req.name()?;

    let pool = &state.pool;
    let slug = unique_slug(&slugify(name), |candidate| async move {
        db::tags::slug_taken(pool, &candidate, Some(id)).await
    })
    .await?;

    let tag = db::tags::update(pool, id, name, &slug)
        .await
        .map_err(slug_conflict)?
        .ok_or_else(|| AppError::NotFound("Tag não encontrada".to_string()))?;

    Ok(Json(tag))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::tags::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Tag não encontrada".to_string()));
    }

    Ok(Json(serde_json::json!({ "sucesso": true })))
}

fn slug_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Já existe uma tag com este slug, tente novamente".to_string())
        }
        _ => AppError::Database(e),
    }
}
