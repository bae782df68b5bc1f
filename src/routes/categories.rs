use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::Category;
use crate::slug::{slugify, unique_slug};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub nome: String,
    pub descricao: Option<String>,
}

impl CategoryRequest {
    fn name(&self) -> Result<&str, AppError> {
        let name = self.nome.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "Nome da categoria é obrigatório".to_string(),
            ));
        }
        Ok(name)
    }

    fn description(&self) -> Option<&str> {
        self.descricao
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = db::categories::list(&state.pool).await?;
    Ok(Json(categories))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    auth.require_admin()?;
    let name = req.name()?;

    let pool = &state.pool;
    let slug = unique_slug(&slugify(name), |candidate| async move {
        db::categories::slug_taken(pool, &candidate, None).await
    })
    .await?;

    let category = db::categories::create(pool, name, &slug, req.description())
        .await
        .map_err(slug_conflict)?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Blog category created");

    Ok(Json(category))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    auth.require_admin()?;
    let name = req.name()?;

    let pool = &state.pool;
    let slug = unique_slug(&slugify(name), |candidate| async move {
        db::categories::slug_taken(pool, &candidate, Some(id)).await
    })
    .await?;

    let category = db::categories::update(pool, id, name, &slug, req.description())
        .await
        .map_err(slug_conflict)?
        .ok_or_else(|| AppError::NotFound("Categoria não encontrada".to_string()))?;

    Ok(Json(category))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::categories::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Categoria não encontrada".to_string()));
    }

    Ok(Json(serde_json::json!({ "sucesso": true })))
}

fn slug_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::Conflict(
            "Já existe uma categoria com este slug, tente novamente".to_string(),
        ),
        _ => AppError::Database(e),
    }
}
