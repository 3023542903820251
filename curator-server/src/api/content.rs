//! Public read endpoints and the contact form.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use curator_core::FeaturedContent;
use curator_types::models::{
    BlogPost, ContactRequest, Page, QueryFilter, SiteStats, SortKey, Video, POSTS_PER_PAGE,
    VIDEOS_PER_PAGE,
};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_LATEST_LIMIT: u64 = 6;
const MAX_LATEST_LIMIT: u64 = 50;

/// Query string of the listing endpoints. Page size defaults per content
/// kind, so it stays optional here.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default, alias = "q")]
    pub search: String,
    #[serde(default, alias = "category")]
    pub tag: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

impl ListingParams {
    fn into_filter(self, default_page_size: u32) -> QueryFilter {
        let filter = QueryFilter {
            sort: self.sort,
            featured_only: self.featured,
            ..QueryFilter::default()
        }
        .with_search(self.search)
        .with_page(self.page.unwrap_or(1), self.page_size.unwrap_or(default_page_size));
        match self.tag {
            Some(tag) => filter.with_tag(tag),
            None => filter,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestParams {
    pub limit: Option<u64>,
}

impl LatestParams {
    fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LATEST_LIMIT).clamp(1, MAX_LATEST_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> ApiResult<Json<Page<Video>>> {
    let filter = params.into_filter(VIDEOS_PER_PAGE);
    let page = state
        .content()
        .list_videos(&filter)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load videos"))?;
    Ok(Json(page))
}

pub async fn latest_videos(
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> ApiResult<Json<Vec<Video>>> {
    Ok(Json(state.content().latest_videos(params.limit()).await?))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Video>> {
    Ok(Json(state.content().video_by_id(&video_id).await?))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> ApiResult<Json<Page<BlogPost>>> {
    let filter = params.into_filter(POSTS_PER_PAGE);
    let page = state
        .content()
        .list_posts(&filter)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to load blog posts"))?;
    Ok(Json(page))
}

pub async fn latest_posts(
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.content().latest_posts(params.limit()).await?))
}

pub async fn blog_tags(State(state): State<AppState>) -> ApiResult<Json<TagsResponse>> {
    Ok(Json(TagsResponse { tags: state.content().blog_tags().await? }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogPost>> {
    Ok(Json(state.content().post_by_slug(&slug).await?))
}

pub async fn featured(State(state): State<AppState>) -> ApiResult<Json<FeaturedContent>> {
    Ok(Json(state.content().featured().await?))
}

pub async fn site_stats(State(state): State<AppState>) -> ApiResult<Json<SiteStats>> {
    Ok(Json(state.content().site_stats().await?))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> ApiResult<(StatusCode, Json<ContactResponse>)> {
    state.content().submit_contact(&request).await?;
    Ok((StatusCode::CREATED, Json(ContactResponse { success: true })))
}
