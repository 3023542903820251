//! Public read side: listings, detail pages, landing-page strips, and the
//! contact form.

use std::collections::BTreeSet;
use std::sync::Arc;

use curator_client::{ClientError, Mutation, RemoteQuery, Selection};
use curator_types::{
    BlogPost, ContactRequest, ContentType, Page, QueryFilter, SiteStats, Video,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::backend::Backend;
use super::query_builder::{build_query, latest_query};
use crate::error::{AppError, AppResult};
use crate::scheduler::KEEP_ALIVE_TABLE;

/// Function that stores and notifies on contact form submissions.
pub const CONTACT_FUNCTION: &str = "contact-form-handler";

/// Featured videos shown on the landing page.
pub const FEATURED_VIDEOS_LIMIT: u64 = 4;
/// Featured posts shown on the landing page.
pub const FEATURED_POSTS_LIMIT: u64 = 2;

/// Landing-page featured strip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeaturedContent {
    pub videos: Vec<Video>,
    pub posts: Vec<BlogPost>,
}

pub struct ContentService {
    backend: Arc<dyn Backend>,
}

impl ContentService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        content_type: ContentType,
        filter: &QueryFilter,
    ) -> AppResult<Page<T>> {
        let selection = self.backend.select(&build_query(content_type, filter)).await?;
        let items = selection.rows_as::<T>()?;
        Ok(Page::new(
            items,
            selection.total_or_len(),
            filter.effective_page(),
            filter.effective_page_size(),
        ))
    }

    /// One page of approved videos.
    pub async fn list_videos(&self, filter: &QueryFilter) -> AppResult<Page<Video>> {
        self.list(ContentType::Video, filter).await
    }

    /// One page of published posts.
    pub async fn list_posts(&self, filter: &QueryFilter) -> AppResult<Page<BlogPost>> {
        self.list(ContentType::BlogPost, filter).await
    }

    /// Distinct tags across published posts, sorted.
    pub async fn blog_tags(&self) -> AppResult<Vec<String>> {
        let query = RemoteQuery::from("blog_posts").select("tags").eq("status", "published");
        let selection = self.backend.select(&query).await?;

        let tags: BTreeSet<String> = selection
            .rows
            .iter()
            .filter_map(|row| row.get("tags").and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Ok(tags.into_iter().collect())
    }

    pub async fn latest_videos(&self, limit: u64) -> AppResult<Vec<Video>> {
        let selection = self.backend.select(&latest_query(ContentType::Video, limit)).await?;
        Ok(selection.rows_as()?)
    }

    pub async fn latest_posts(&self, limit: u64) -> AppResult<Vec<BlogPost>> {
        let selection = self.backend.select(&latest_query(ContentType::BlogPost, limit)).await?;
        Ok(selection.rows_as()?)
    }

    /// Featured videos and posts. A failing post query leaves the post
    /// list empty; a failing video query fails the whole call.
    pub async fn featured(&self) -> AppResult<FeaturedContent> {
        let videos_query = RemoteQuery::from("videos")
            .eq("is_featured", true)
            .eq("is_approved", true)
            .order("created_at", false)
            .limit(FEATURED_VIDEOS_LIMIT);
        let posts_query = RemoteQuery::from("blog_posts")
            .eq("is_featured", true)
            .eq("status", "published")
            .order("published_at", false)
            .limit(FEATURED_POSTS_LIMIT);

        let (videos, posts) =
            futures::join!(self.backend.select(&videos_query), self.backend.select(&posts_query));

        let videos = videos?.rows_as()?;
        let posts = match posts.and_then(|s| s.rows_as()) {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("[Content] Featured posts unavailable: {}", e);
                Vec::new()
            },
        };
        Ok(FeaturedContent { videos, posts })
    }

    /// Approved video by its YouTube id.
    pub async fn video_by_id(&self, video_id: &str) -> AppResult<Video> {
        let query = RemoteQuery::from("videos")
            .eq("is_approved", true)
            .eq("video_id", video_id)
            .limit(1);
        let selection = self.backend.select(&query).await?;
        first_row(&selection)?.ok_or_else(|| AppError::not_found("video", video_id))
    }

    /// Published post by slug. Also bumps the post's view count; a failed
    /// bump is logged and does not fail the read.
    pub async fn post_by_slug(&self, slug: &str) -> AppResult<BlogPost> {
        let query = RemoteQuery::from("blog_posts")
            .eq("slug", slug)
            .eq("status", "published")
            .limit(1);
        let selection = self.backend.select(&query).await?;
        let mut post: BlogPost =
            first_row(&selection)?.ok_or_else(|| AppError::not_found("blog post", slug))?;

        let views = post.view_count.saturating_add(1);
        let bump = Mutation::update_by_id("blog_posts", &post.id, json!({ "view_count": views }));
        match self.backend.execute(&bump).await {
            Ok(()) => post.view_count = views,
            Err(e) => tracing::warn!("[Content] Failed to record view for {}: {}", slug, e),
        }
        Ok(post)
    }

    /// Narrow read for external uptime pingers. Leaves the scheduler's
    /// status untouched.
    pub async fn ping(&self) -> AppResult<()> {
        let query = RemoteQuery::from(KEEP_ALIVE_TABLE).select("id").limit(1);
        self.backend.select(&query).await?;
        Ok(())
    }

    /// Landing-page statistics strip.
    pub async fn site_stats(&self) -> AppResult<SiteStats> {
        let videos = RemoteQuery::from("videos").select("view_count").eq("is_approved", true);
        let posts = RemoteQuery::from("blog_posts").select("view_count").eq("status", "published");
        let channels =
            RemoteQuery::from("youtube_channels").select("id").eq("is_active", true).head();

        let (videos, posts, channels) = futures::try_join!(
            self.backend.select(&videos),
            self.backend.select(&posts),
            self.backend.select(&channels),
        )?;

        Ok(SiteStats {
            total_videos: videos.rows.len() as u64,
            total_posts: posts.rows.len() as u64,
            active_channels: channels.total_or_len(),
            total_views: sum_views(&videos) + sum_views(&posts),
        })
    }

    /// Validate a contact form submission and hand it to the contact
    /// function.
    pub async fn submit_contact(&self, request: &ContactRequest) -> AppResult<()> {
        let request = request.normalized()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| AppError::from(ClientError::InvalidRequest(e.to_string())))?;

        let reply = self.backend.invoke(CONTACT_FUNCTION, Some(&body)).await?;
        if reply.get("success").and_then(Value::as_bool) == Some(false) {
            let message =
                reply.get("error").and_then(Value::as_str).unwrap_or("submission rejected");
            return Err(ClientError::Function {
                function: CONTACT_FUNCTION.to_string(),
                message: message.to_string(),
            }
            .into());
        }
        tracing::info!("[Content] Contact submission accepted");
        Ok(())
    }
}

fn first_row<T: serde::de::DeserializeOwned>(selection: &Selection) -> AppResult<Option<T>> {
    selection
        .rows
        .first()
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| ClientError::InvalidResponse(e.to_string()).into())
}

fn sum_views(selection: &Selection) -> u64 {
    selection
        .rows
        .iter()
        .filter_map(|row| row.get("view_count").and_then(Value::as_u64))
        .sum()
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod content_tests;
