//! HTTP-level tests that never reach PostgreSQL: the reset lifecycle runs
//! against the in-memory store and the pool is only lazily configured.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use maiscrianca::auth::{password, token};
use maiscrianca::models::PasswordResetToken;
use maiscrianca::reset::{InMemoryResetStore, ResetStore};
use maiscrianca::state::SharedState;

const UNUSED_DB: &str = "postgres://localhost/maiscrianca_unused";

struct Harness {
    app: Router,
    state: SharedState,
    store: Arc<InMemoryResetStore>,
}

fn harness() -> Harness {
    let pool = PgPoolOptions::new()
        .connect_lazy(UNUSED_DB)
        .expect("lazy pool");
    let store = Arc::new(InMemoryResetStore::new());
    let state = maiscrianca::build_state(pool, common::test_config(UNUSED_DB), store.clone());
    let app = maiscrianca::router(state.clone());
    Harness { app, state, store }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ── Verify ──────────────────────────────────────────────────────

#[tokio::test]
async fn verify_token_returns_user_for_valid_token() {
    let h = harness();
    let user_id = Uuid::new_v4();
    let plaintext = h.state.resets.issue(user_id, "bia@test.com").await.unwrap();

    let (status, body) = send(&h.app, get(&format!("/auth/verificar-token?token={plaintext}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valido"], json!(true));
    assert_eq!(body["usuarioId"], json!(user_id.to_string()));
    assert_eq!(body["email"], json!("bia@test.com"));
}

#[tokio::test]
async fn verify_token_expired_then_invalid() {
    let h = harness();
    h.store
        .insert(&PasswordResetToken {
            token_hash: token::hash("velho"),
            user_id: Uuid::new_v4(),
            email: "bia@test.com".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        })
        .await
        .unwrap();

    let (status, body) = send(&h.app, get("/auth/verificar-token?token=velho")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valido"], json!(false));
    assert_eq!(body["motivo"], json!("expirado"));

    let (status, body) = send(&h.app, get("/auth/verificar-token?token=velho")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["motivo"], json!("invalido"));
}

#[tokio::test]
async fn verify_token_without_token_is_rejected() {
    let h = harness();

    let (status, body) = send(&h.app, get("/auth/verificar-token")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valido"], json!(false));
    assert_eq!(body["motivo"], json!("ausente"));

    let (status, _) = send(&h.app, get("/auth/verificar-token?token=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Redeem ──────────────────────────────────────────────────────

#[tokio::test]
async fn reset_password_succeeds_once() {
    let h = harness();
    let user_id = Uuid::new_v4();
    h.store.add_session(user_id);
    let plaintext = h.state.resets.issue(user_id, "bia@test.com").await.unwrap();

    let (status, body) = send(
        &h.app,
        post_json(
            "/auth/redefinir-senha",
            &json!({ "token": plaintext, "novaSenha": "NewSecret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["sucesso"], json!(true));

    let stored = h.store.secret_for(user_id).unwrap();
    assert!(password::verify("NewSecret123", &stored).unwrap());
    assert_eq!(h.store.session_count(user_id), 0);

    let (status, body) = send(
        &h.app,
        post_json(
            "/auth/redefinir-senha",
            &json!({ "token": plaintext, "novaSenha": "AnotherSecret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["sucesso"], json!(false));
    assert_eq!(body["erro"], json!("TokenInvalid"));
}

#[tokio::test]
async fn reset_password_with_expired_token() {
    let h = harness();
    h.store
        .insert(&PasswordResetToken {
            token_hash: token::hash("vencido"),
            user_id: Uuid::new_v4(),
            email: "bia@test.com".to_string(),
            expires_at: Utc::now() - Duration::minutes(5),
        })
        .await
        .unwrap();

    let (status, body) = send(
        &h.app,
        post_json(
            "/auth/redefinir-senha",
            &json!({ "token": "vencido", "novaSenha": "NewSecret123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], json!("TokenExpired"));
    assert_eq!(h.store.token_count(), 0);
}

#[tokio::test]
async fn reset_password_requires_both_fields() {
    let h = harness();

    let (status, body) = send(&h.app, post_json("/auth/redefinir-senha", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], json!("ValidationError"));

    let (status, _) = send(
        &h.app,
        post_json("/auth/redefinir-senha", &json!({ "token": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Request validation before any lookup ────────────────────────

#[tokio::test]
async fn login_requires_email_and_password() {
    let h = harness();

    let (status, body) = send(&h.app, post_json("/auth/login", &json!({ "email": "a@b.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["sucesso"], json!(false));
    assert_eq!(body["erro"], json!("ValidationError"));
}

#[tokio::test]
async fn forgot_password_requires_email() {
    let h = harness();

    let (status, _) = send(&h.app, post_json("/auth/esqueci-senha", &json!({ "email": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_body_gets_json_error() {
    let h = harness();

    for uri in ["/auth/login", "/auth/esqueci-senha", "/auth/redefinir-senha"] {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = h.app.clone().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["erro"], json!("ValidationError"));
    }
}

#[tokio::test]
async fn body_without_content_type_gets_json_error() {
    let h = harness();
    let plaintext = h.state.resets.issue(Uuid::new_v4(), "bia@test.com").await.unwrap();

    let req = Request::post("/auth/redefinir-senha")
        .body(Body::from(
            json!({ "token": plaintext, "novaSenha": "segredo" }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&h.app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["sucesso"], json!(false));
    assert_eq!(body["erro"], json!("ValidationError"));
    // Rejected before the token was looked at
    assert!(h.store.contains(&token::hash(&plaintext)));
}

#[tokio::test]
async fn logout_without_session_clears_cookie() {
    let h = harness();

    let resp = h
        .app
        .clone()
        .oneshot(Request::post("/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("sessao="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn admin_routes_require_session() {
    let h = harness();

    let (status, body) = send(&h.app, post_json("/api/admin/tags", &json!({ "nome": "Livros" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["erro"], json!("Unauthorized"));

    let (status, _) = send(&h.app, get("/auth/sessao")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_sets_security_headers() {
    let h = harness();

    let resp = h.app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
}
