//! API Routes
//!
//! Public content endpoints under `/api`, moderation and sync controls
//! under `/api/admin`.

pub mod admin;
pub mod content;
pub mod error;
pub mod sync;

#[cfg(test)]
mod content_tests;
#[cfg(test)]
mod sync_tests;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Keep-alive + status indicator
        .route("/keep-alive", get(sync::keep_alive))
        .route("/sync/status", get(sync::get_sync_status))
        // Videos
        .route("/videos", get(content::list_videos))
        .route("/videos/latest", get(content::latest_videos))
        .route("/videos/:video_id", get(content::get_video))
        // Blog
        .route("/blog", get(content::list_posts))
        .route("/blog/latest", get(content::latest_posts))
        .route("/blog/tags", get(content::blog_tags))
        .route("/blog/:slug", get(content::get_post))
        // Landing page
        .route("/featured", get(content::featured))
        .route("/stats", get(content::site_stats))
        // Contact
        .route("/contact", post(content::submit_contact))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        // Sync
        .route("/sync/status", get(sync::get_sync_status))
        .route("/sync/config", get(sync::get_sync_config).post(sync::update_sync_config))
        .route("/sync/force", post(sync::force_sync))
        .route("/sync/keep-alive", post(sync::force_keep_alive))
        // Videos
        .route("/videos", get(admin::list_videos).post(admin::add_video))
        .route("/videos/:id", patch(admin::update_video).delete(admin::delete_video))
        // Blog
        .route("/posts", get(admin::list_posts).post(admin::create_post))
        .route(
            "/posts/:id",
            patch(admin::update_post).put(admin::replace_post).delete(admin::delete_post),
        )
        // Contact
        .route("/contacts", get(admin::list_contacts))
        .route("/contacts/:id", patch(admin::update_contact).delete(admin::delete_contact))
        // Channels
        .route("/channels", get(admin::list_channels).post(admin::add_channel))
        .route("/channels/:id", patch(admin::update_channel).delete(admin::delete_channel))
        // Dashboard
        .route("/dashboard", get(admin::dashboard))
}

pub async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}
