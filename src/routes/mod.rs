pub mod auth;
pub mod banners;
pub mod categories;
pub mod tags;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn auth_routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/sessao", get(auth::current_session))
        .route("/auth/esqueci-senha", post(auth::forgot_password))
        .route("/auth/verificar-token", get(auth::verify_token))
        .route("/auth/redefinir-senha", post(auth::reset_password))
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Public catalog
        .route("/api/tags", get(tags::list))
        .route("/api/blog/categorias", get(categories::list))
        .route("/api/banners", get(banners::list_active))
        // Admin: tags
        .route("/api/admin/tags", post(tags::create))
        .route("/api/admin/tags/{id}", put(tags::update).delete(tags::delete))
        // Admin: blog categories
        .route("/api/admin/categorias", post(categories::create))
        .route(
            "/api/admin/categorias/{id}",
            put(categories::update).delete(categories::delete),
        )
        // Admin: banners
        .route(
            "/api/admin/banners",
            get(banners::list_all).post(banners::create),
        )
        .route(
            "/api/admin/banners/{id}",
            get(banners::get)
                .put(banners::update)
                .delete(banners::delete),
        )
}
