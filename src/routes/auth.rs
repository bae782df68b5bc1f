use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::{cookies, password, token};
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::User;
use crate::reset::VerifyOutcome;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub nova_senha: String,
}

#[derive(Deserialize)]
pub struct VerifyTokenQuery {
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub sucesso: bool,
    pub usuario: User,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub sucesso: bool,
    pub mensagem: String,
}

impl MessageResponse {
    fn ok(mensagem: &str) -> Json<Self> {
        Json(Self {
            sucesso: true,
            mensagem: mensagem.to_string(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub valido: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<&'static str>,
}

impl VerifyTokenResponse {
    fn rejected(motivo: &'static str, mensagem: &'static str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                valido: false,
                usuario_id: None,
                email: None,
                motivo: Some(motivo),
                mensagem: Some(mensagem),
            }),
        )
    }
}

pub async fn login(
    State(state): State<SharedState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    if req.email.trim().is_empty() || req.senha.is_empty() {
        return Err(AppError::BadRequest(
            "Email e senha são obrigatórios".to_string(),
        ));
    }

    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Muitas tentativas de login. Tente novamente mais tarde.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, req.email.trim()).await? else {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Email ou senha inválidos".to_string()));
    };

    let valid = password::verify(&req.senha, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Email ou senha inválidos".to_string()));
    }

    state.login_limiter.reset(&req.email);

    let session_token = token::generate();
    db::sessions::create(
        &state.pool,
        user.id,
        &token::hash(&session_token),
        Utc::now() + Duration::days(state.config.session_ttl_days),
    )
    .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    let jar = cookies::session_cookie(
        &session_token,
        state.config.session_ttl_days,
        state.config.secure_cookies(),
    );
    Ok((jar, Json(SessionResponse {
        sucesso: true,
        usuario: user,
    })))
}

pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if let Some(value) = cookies::session_token(&headers) {
        db::sessions::delete_by_hash(&state.pool, &token::hash(&value)).await?;
    }

    Ok((cookies::clear_session_cookie(), MessageResponse::ok("Sessão encerrada")))
}

pub async fn current_session(auth: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        sucesso: true,
        usuario: auth.user,
    })
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = req.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email é obrigatório".to_string()));
    }

    // Same answer whether or not the email exists
    let response = MessageResponse::ok(
        "Se o email estiver cadastrado, enviaremos um link de redefinição.",
    );

    let state = state.clone();
    tokio::spawn(async move {
        let user = match db::users::find_by_email(&state.pool, &email).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Password reset lookup failed: {e}");
                return;
            }
        };

        let reset_token = match state.resets.issue(user.id, &user.email).await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Failed to issue password reset token: {e}");
                return;
            }
        };

        let reset_url = format!(
            "{}/redefinir-senha?token={reset_token}",
            state.config.base_url
        );
        match &state.system_mailer {
            Some(mailer) => {
                let ttl = state.resets.ttl().num_minutes();
                if let Err(e) = mailer.send_password_reset(&user.email, &reset_url, ttl).await {
                    tracing::error!("Failed to send password reset email: {e}");
                }
            }
            None => {
                tracing::warn!("SMTP not configured. Password reset link: {reset_url}");
            }
        }
    });

    Ok(response)
}

pub async fn verify_token(
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<VerifyTokenQuery>,
) -> Result<(StatusCode, Json<VerifyTokenResponse>), AppError> {
    let Some(value) = query.token.filter(|t| !t.is_empty()) else {
        return Ok(VerifyTokenResponse::rejected("ausente", "Token é obrigatório"));
    };

    let response = match state.resets.verify(&value).await? {
        VerifyOutcome::Valid { user_id, email } => (
            StatusCode::OK,
            Json(VerifyTokenResponse {
                valido: true,
                usuario_id: Some(user_id),
                email: Some(email),
                motivo: None,
                mensagem: None,
            }),
        ),
        VerifyOutcome::Expired => VerifyTokenResponse::rejected("expirado", "Token expirado"),
        VerifyOutcome::NotFound => VerifyTokenResponse::rejected("invalido", "Token inválido"),
    };

    Ok(response)
}

pub async fn reset_password(
    State(state): State<SharedState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = state.resets.redeem(&req.token, &req.nova_senha).await?;

    if state.system_mailer.is_some() {
        let state = state.clone();
        tokio::spawn(async move {
            let Some(mailer) = &state.system_mailer else {
                return;
            };
            match db::users::find_by_id(&state.pool, user_id).await {
                Ok(Some(user)) => {
                    if let Err(e) = mailer
                        .send_password_changed(&user.email, &state.config.base_url)
                        .await
                    {
                        tracing::error!("Failed to send password changed email: {e}");
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::error!("Password changed lookup failed: {e}"),
            }
        });
    }

    Ok(MessageResponse::ok("Senha redefinida com sucesso"))
}
