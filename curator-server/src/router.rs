use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware, response::IntoResponse, routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::middleware::{admin_auth_middleware, cors_layer};
use crate::state::AppState;

/// Request bodies are small JSON documents (contact form, blog drafts).
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let protected_api = Router::<AppState>::new()
        .nest("/api/admin", api::admin_router())
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .nest("/api", api::router());

    protected_api
        .merge(public_routes)
        .fallback(api::api_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "commit": option_env!("GIT_COMMIT").unwrap_or("unknown"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod router_tests;
