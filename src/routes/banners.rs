use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::Banner;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub imagem_url: String,
    pub link: Option<String>,
    #[serde(default)]
    pub posicao: i32,
    #[serde(default = "default_active")]
    pub ativo: bool,
}

fn default_active() -> bool {
    true
}

impl BannerRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.titulo.trim().is_empty() || self.imagem_url.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Título e imagem são obrigatórios".to_string(),
            ));
        }
        Ok(())
    }

    fn link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

pub async fn list_active(State(state): State<SharedState>) -> Result<Json<Vec<Banner>>, AppError> {
    let banners = db::banners::list_active(&state.pool).await?;
    Ok(Json(banners))
}

pub async fn list_all(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Banner>>, AppError> {
    auth.require_admin()?;
    let banners = db::banners::list_all(&state.pool).await?;
    Ok(Json(banners))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Banner>, AppError> {
    auth.require_admin()?;
    let banner = db::banners::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Banner não encontrado".to_string()))?;
    Ok(Json(banner))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<BannerRequest>,
) -> Result<Json<Banner>, AppError> {
    auth.require_admin()?;
    req.validate()?;

    let banner = db::banners::create(
        &state.pool,
        req.titulo.trim(),
        req.imagem_url.trim(),
        req.link(),
        req.posicao,
        req.ativo,
    )
    .await?;
    tracing::info!(banner_id = %banner.id, "Banner created");

    Ok(Json(banner))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<BannerRequest>,
) -> Result<Json<Banner>, AppError> {
    auth.require_admin()?;
    req.validate()?;

    let banner = db::banners::update(
        &state.pool,
        id,
        req.titulo.trim(),
        req.imagem_url.trim(),
        req.link(),
        req.posicao,
        req.ativo,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Banner não encontrado".to_string()))?;

    Ok(Json(banner))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::banners::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Banner não encontrado".to_string()));
    }

    Ok(Json(serde_json::json!({ "sucesso": true })))
}
