pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod extract;
pub mod models;
pub mod rate_limit;
pub mod reset;
pub mod routes;
pub mod slug;
pub mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use chrono::Duration;
use sqlx::PgPool;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::password;
use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::AttemptLimiter;
use crate::reset::{ResetService, ResetStore};
use crate::state::{AppState, SharedState};

/// Assemble the shared state around an already-connected pool.
pub fn build_state(pool: PgPool, config: Config, store: Arc<dyn ResetStore>) -> SharedState {
    let system_mailer = config.smtp.as_ref().and_then(|smtp| {
        match SystemMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                None
            }
        }
    });

    let resets = ResetService::new(store, Duration::minutes(config.reset_token_ttl_minutes));

    Arc::new(AppState {
        pool,
        config,
        resets,
        system_mailer,
        login_limiter: AttemptLimiter::for_login(),
    })
}

pub fn router(state: SharedState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

/// Create the configured admin account if no account with that email exists yet.
pub async fn bootstrap_admin(pool: &PgPool, config: &Config) -> Result<(), String> {
    let Some(admin) = &config.admin else {
        return Ok(());
    };

    let existing = db::users::find_by_email(pool, &admin.email)
        .await
        .map_err(|e| format!("Admin lookup failed: {e}"))?;
    if existing.is_some() {
        return Ok(());
    }

    let hash = password::hash(&admin.password)?;
    db::users::create(pool, &admin.email, &hash, "Administrador", true)
        .await
        .map_err(|e| format!("Failed to create admin: {e}"))?;

    tracing::info!("Bootstrap admin {} created", admin.email);
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
