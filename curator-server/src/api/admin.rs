//! Moderation handlers: videos, blog posts, contact submissions, channels,
//! and the dashboard counters.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use curator_core::{AdminListQuery, VideoListFilter};
use curator_types::models::{
    BlogPost, BlogPostDraft, ContactStatus, ContactSubmission, DashboardCounts, Page, PostStatus,
    Video, YouTubeChannel,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn ok() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

// ===== Videos =====

#[derive(Debug, Default, Deserialize)]
pub struct VideoListParams {
    #[serde(default)]
    pub filter: VideoListFilter,
}

#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    /// Video id or any watch/share/embed URL
    pub video: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoPatch {
    pub is_featured: Option<bool>,
    pub is_hidden: Option<bool>,
    pub is_approved: Option<bool>,
}

pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<VideoListParams>,
    Query(list): Query<AdminListQuery>,
) -> ApiResult<Json<Page<Video>>> {
    let page = state
        .admin()
        .list_videos(params.filter, &list)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load videos"))?;
    Ok(Json(page))
}

pub async fn add_video(
    State(state): State<AppState>,
    Json(request): Json<AddVideoRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let reply = state.admin().add_video(&request.video).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<VideoPatch>,
) -> ApiResult<Json<SuccessResponse>> {
    let admin = state.admin();
    if patch.is_featured.is_none() && patch.is_hidden.is_none() && patch.is_approved.is_none() {
        return Err(ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Nothing to update"));
    }
    if let Some(featured) = patch.is_featured {
        admin.set_video_featured(&id, featured).await?;
    }
    if let Some(hidden) = patch.is_hidden {
        admin.set_video_hidden(&id, hidden).await?;
    }
    if let Some(approved) = patch.is_approved {
        admin.set_video_approved(&id, approved).await?;
    }
    Ok(ok())
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().delete_video(&id).await?;
    Ok(ok())
}

// ===== Blog =====

#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub status: Option<PostStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostPatch {
    pub is_featured: Option<bool>,
    pub status: Option<PostStatus>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
    Query(list): Query<AdminListQuery>,
) -> ApiResult<Json<Page<BlogPost>>> {
    let page = state
        .admin()
        .list_posts(params.status, &list)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load blog posts"))?;
    Ok(Json(page))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(draft): Json<BlogPostDraft>,
) -> ApiResult<(StatusCode, Json<SuccessResponse>)> {
    state.admin().create_post(&draft).await?;
    Ok((StatusCode::CREATED, ok()))
}

pub async fn replace_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<BlogPostDraft>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().update_post(&id, &draft).await?;
    Ok(ok())
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> ApiResult<Json<SuccessResponse>> {
    let admin = state.admin();
    if patch.is_featured.is_none() && patch.status.is_none() {
        return Err(ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Nothing to update"));
    }
    if let Some(featured) = patch.is_featured {
        admin.set_post_featured(&id, featured).await?;
    }
    if let Some(status) = patch.status {
        admin.set_post_status(&id, status).await?;
    }
    Ok(ok())
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().delete_post(&id).await?;
    Ok(ok())
}

// ===== Contact =====

#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ContactPatch {
    pub status: ContactStatus,
}

pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ContactListParams>,
    Query(list): Query<AdminListQuery>,
) -> ApiResult<Json<Page<ContactSubmission>>> {
    let page = state
        .admin()
        .list_contacts(params.status, &list)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load messages"))?;
    Ok(Json(page))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().set_contact_status(&id, patch.status).await?;
    Ok(ok())
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().delete_contact(&id).await?;
    Ok(ok())
}

// ===== Channels =====

#[derive(Debug, Deserialize)]
pub struct AddChannelRequest {
    /// Channel id, @handle, or legacy username
    pub channel: String,
}

#[derive(Debug, Deserialize)]
pub struct ChannelPatch {
    pub is_active: bool,
}

pub async fn list_channels(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<YouTubeChannel>>> {
    let channels = state
        .admin()
        .list_channels()
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load channels"))?;
    Ok(Json(channels))
}

pub async fn add_channel(
    State(state): State<AppState>,
    Json(request): Json<AddChannelRequest>,
) -> ApiResult<(StatusCode, Json<YouTubeChannel>)> {
    let channel = state.admin().add_channel(&request.channel).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ChannelPatch>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().set_channel_active(&id, patch.is_active).await?;
    Ok(ok())
}

pub async fn delete_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.admin().delete_channel(&id).await?;
    Ok(ok())
}

// ===== Dashboard =====

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardCounts>> {
    Ok(Json(state.admin().dashboard_counts().await?))
}
