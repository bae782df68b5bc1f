use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{cookies, token};
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

/// The user behind a live session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.user.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Acesso restrito a administradores".to_string()))
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let value = cookies::session_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Sessão ausente".to_string()))?;

        let session = db::sessions::find_active_by_hash(&state.pool, &token::hash(&value))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Sessão inválida ou expirada".to_string()))?;

        let user = db::users::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuário não encontrado".to_string()))?;

        Ok(AuthUser { user })
    }
}
