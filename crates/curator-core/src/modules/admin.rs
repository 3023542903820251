//! Moderation operations behind the admin API.

use std::sync::Arc;

use chrono::Utc;
use curator_client::{ClientError, Filter, Mutation, RemoteQuery};
use curator_types::{
    BlogPost, BlogPostDraft, ConfigError, ContactStatus, ContactSubmission, DashboardCounts, Page,
    PostStatus, Video, YouTubeChannel,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::backend::{Backend, ChannelDirectory};
use crate::error::{AppError, AppResult};

/// Function that imports a single video by YouTube id.
pub const ADD_VIDEO_FUNCTION: &str = "youtube-video-add";

/// Which videos the moderation list shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoListFilter {
    #[default]
    All,
    Featured,
    Hidden,
}

/// Paging and search for the moderation lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for AdminListQuery {
    fn default() -> Self {
        Self { search: String::new(), page: default_page(), page_size: default_page_size() }
    }
}

impl AdminListQuery {
    fn window(&self) -> (u32, u32, u64, u64) {
        let page = self.page.max(1);
        let size = self.page_size.max(1);
        let from = u64::from(page - 1) * u64::from(size);
        (page, size, from, from + u64::from(size) - 1)
    }
}

/// Pull the 11-character video id out of a watch, share, or embed URL.
/// Anything else is returned trimmed, as-is.
pub fn extract_video_id(input: &str) -> String {
    let input = input.trim();
    let candidates = ["youtu.be/", "v=", "/embed/", "/v/", "/shorts/"];
    for marker in candidates {
        if let Some(idx) = input.find(marker) {
            let rest = &input[idx + marker.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            if id.len() == 11 {
                return id;
            }
        }
    }
    input.to_string()
}

pub struct AdminService {
    backend: Arc<dyn Backend>,
    directory: Option<Arc<dyn ChannelDirectory>>,
}

impl AdminService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend, directory: None }
    }

    /// Enable channel lookups (needs a YouTube API key in production).
    pub fn with_directory(mut self, directory: Arc<dyn ChannelDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    async fn page_of<T: serde::de::DeserializeOwned>(
        &self,
        query: RemoteQuery,
        page: u32,
        page_size: u32,
    ) -> AppResult<Page<T>> {
        let selection = self.backend.select(&query).await?;
        Ok(Page::new(selection.rows_as()?, selection.total_or_len(), page, page_size))
    }

    async fn patch(&self, table: &str, id: &str, patch: Value) -> AppResult<()> {
        self.backend.execute(&Mutation::update_by_id(table, id, patch)).await?;
        tracing::info!("[Admin] Updated {} {}", table, id);
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> AppResult<()> {
        self.backend.execute(&Mutation::delete_by_id(table, id)).await?;
        tracing::info!("[Admin] Deleted {} {}", table, id);
        Ok(())
    }

    // ===== Videos =====

    /// All videos regardless of approval, newest row first.
    pub async fn list_videos(
        &self,
        filter: VideoListFilter,
        list: &AdminListQuery,
    ) -> AppResult<Page<Video>> {
        let (page, size, from, to) = list.window();
        let mut query = RemoteQuery::from("videos").count_exact();
        query = match filter {
            VideoListFilter::All => query,
            VideoListFilter::Featured => query.eq("is_featured", true),
            VideoListFilter::Hidden => query.eq("is_hidden", true),
        };
        let term = list.search.trim();
        if !term.is_empty() {
            query = query
                .or(vec![Filter::ilike("title", term), Filter::ilike("description", term)]);
        }
        self.page_of(query.order("created_at", false).range(from, to), page, size).await
    }

    pub async fn set_video_featured(&self, id: &str, featured: bool) -> AppResult<()> {
        self.patch("videos", id, json!({ "is_featured": featured })).await
    }

    pub async fn set_video_hidden(&self, id: &str, hidden: bool) -> AppResult<()> {
        self.patch("videos", id, json!({ "is_hidden": hidden })).await
    }

    pub async fn set_video_approved(&self, id: &str, approved: bool) -> AppResult<()> {
        self.patch("videos", id, json!({ "is_approved": approved })).await
    }

    pub async fn delete_video(&self, id: &str) -> AppResult<()> {
        self.delete("videos", id).await
    }

    /// Import one video by id or URL through the import function; returns
    /// the function's reply.
    pub async fn add_video(&self, input: &str) -> AppResult<Value> {
        let video_id = extract_video_id(input);
        if video_id.is_empty() {
            return Err(AppError::invalid("video_id", "must not be empty"));
        }
        let reply =
            self.backend.invoke(ADD_VIDEO_FUNCTION, Some(&json!({ "videoId": video_id }))).await?;
        if reply.get("success").and_then(Value::as_bool) == Some(false) {
            let message = reply.get("error").and_then(Value::as_str).unwrap_or("import failed");
            return Err(ClientError::Function {
                function: ADD_VIDEO_FUNCTION.to_string(),
                message: message.to_string(),
            }
            .into());
        }
        tracing::info!("[Admin] Imported video {}", video_id);
        Ok(reply)
    }

    // ===== Blog =====

    /// Posts in every status, most recently created first.
    pub async fn list_posts(
        &self,
        status: Option<PostStatus>,
        list: &AdminListQuery,
    ) -> AppResult<Page<BlogPost>> {
        let (page, size, from, to) = list.window();
        let mut query = RemoteQuery::from("blog_posts").count_exact();
        if let Some(status) = status {
            query = query.eq("status", status.as_str());
        }
        let term = list.search.trim();
        if !term.is_empty() {
            query = query.or(vec![Filter::ilike("title", term), Filter::ilike("excerpt", term)]);
        }
        self.page_of(query.order("created_at", false).range(from, to), page, size).await
    }

    fn post_row(draft: &BlogPostDraft) -> AppResult<Value> {
        draft.validate()?;
        let mut row = serde_json::to_value(draft)
            .map_err(|e| AppError::from(ClientError::InvalidRequest(e.to_string())))?;
        if let Some(obj) = row.as_object_mut() {
            obj.insert("slug".to_string(), Value::String(draft.slug.trim().to_string()));
            obj.insert("updated_at".to_string(), json!(Utc::now()));
            if draft.status == PostStatus::Published {
                obj.insert("published_at".to_string(), json!(Utc::now()));
            }
        }
        Ok(row)
    }

    pub async fn create_post(&self, draft: &BlogPostDraft) -> AppResult<()> {
        let row = Self::post_row(draft)?;
        self.backend.execute(&Mutation::insert("blog_posts", row)).await?;
        tracing::info!("[Admin] Created post {}", draft.slug);
        Ok(())
    }

    pub async fn update_post(&self, id: &str, draft: &BlogPostDraft) -> AppResult<()> {
        let row = Self::post_row(draft)?;
        self.patch("blog_posts", id, row).await
    }

    pub async fn set_post_featured(&self, id: &str, featured: bool) -> AppResult<()> {
        self.patch("blog_posts", id, json!({ "is_featured": featured })).await
    }

    /// Change status; publishing stamps `published_at`.
    pub async fn set_post_status(&self, id: &str, status: PostStatus) -> AppResult<()> {
        let mut patch = json!({ "status": status.as_str(), "updated_at": Utc::now() });
        if status == PostStatus::Published {
            patch["published_at"] = json!(Utc::now());
        }
        self.patch("blog_posts", id, patch).await
    }

    pub async fn delete_post(&self, id: &str) -> AppResult<()> {
        self.delete("blog_posts", id).await
    }

    // ===== Contact =====

    pub async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        list: &AdminListQuery,
    ) -> AppResult<Page<ContactSubmission>> {
        let (page, size, from, to) = list.window();
        let mut query = RemoteQuery::from("contact_submissions").count_exact();
        if let Some(status) = status {
            query = query.eq("status", status.as_str());
        }
        self.page_of(query.order("created_at", false).range(from, to), page, size).await
    }

    pub async fn set_contact_status(&self, id: &str, status: ContactStatus) -> AppResult<()> {
        self.patch("contact_submissions", id, json!({ "status": status.as_str() })).await
    }

    pub async fn delete_contact(&self, id: &str) -> AppResult<()> {
        self.delete("contact_submissions", id).await
    }

    // ===== Channels =====

    pub async fn list_channels(&self) -> AppResult<Vec<YouTubeChannel>> {
        let query = RemoteQuery::from("youtube_channels").order("created_at", false);
        Ok(self.backend.select(&query).await?.rows_as()?)
    }

    /// Look a channel up by id or handle and start tracking it.
    pub async fn add_channel(&self, input: &str) -> AppResult<YouTubeChannel> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::invalid("channel", "must not be empty"));
        }
        let directory =
            self.directory.as_ref().ok_or_else(|| ConfigError::missing("YOUTUBE_API_KEY"))?;
        let channel = directory.resolve_channel(input).await?;

        let existing = RemoteQuery::from("youtube_channels")
            .select("id")
            .eq("channel_id", &channel.channel_id)
            .limit(1);
        if !self.backend.select(&existing).await?.rows.is_empty() {
            return Err(AppError::invalid(
                "channel",
                format!("{} is already tracked", channel.channel_name),
            ));
        }

        let row = json!({
            "channel_id": channel.channel_id,
            "channel_name": channel.channel_name,
            "channel_description": channel.channel_description,
            "channel_thumbnail": channel.channel_thumbnail,
            "subscriber_count": channel.subscriber_count,
            "video_count": channel.video_count,
            "is_active": true,
        });
        self.backend.execute(&Mutation::insert("youtube_channels", row)).await?;
        tracing::info!(
            "[Admin] Tracking channel {} ({})",
            channel.channel_name,
            channel.channel_id
        );
        Ok(channel)
    }

    pub async fn set_channel_active(&self, id: &str, active: bool) -> AppResult<()> {
        self.patch("youtube_channels", id, json!({ "is_active": active })).await
    }

    pub async fn delete_channel(&self, id: &str) -> AppResult<()> {
        self.delete("youtube_channels", id).await
    }

    // ===== Dashboard =====

    async fn count(&self, query: RemoteQuery) -> AppResult<u64> {
        Ok(self.backend.select(&query.select("id").head()).await?.total.unwrap_or(0))
    }

    pub async fn dashboard_counts(&self) -> AppResult<DashboardCounts> {
        let (channels, videos, blog_posts, contact_submissions, featured_videos, published_posts) =
            futures::try_join!(
                self.count(RemoteQuery::from("youtube_channels")),
                self.count(RemoteQuery::from("videos")),
                self.count(RemoteQuery::from("blog_posts")),
                self.count(RemoteQuery::from("contact_submissions")),
                self.count(RemoteQuery::from("videos").eq("is_featured", true)),
                self.count(RemoteQuery::from("blog_posts").eq("status", "published")),
            )?;

        Ok(DashboardCounts {
            channels,
            videos,
            blog_posts,
            contact_submissions,
            featured_videos,
            published_posts,
        })
    }
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod admin_tests;
