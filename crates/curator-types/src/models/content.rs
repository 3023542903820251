//! Curated content entities as stored in the hosted backend.
//!
//! Field names follow the backend column names so rows deserialize
//! directly from PostgREST JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// A YouTube video pulled in by the remote sync function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    /// Row id
    pub id: String,
    /// YouTube video id (the `v=` parameter)
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Video description
    #[serde(default)]
    pub description: Option<String>,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Row id of the owning channel
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Upstream publish date
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    /// ISO-8601 duration as reported upstream
    #[serde(default)]
    pub duration: Option<String>,
    /// View count
    #[serde(default)]
    pub view_count: u64,
    /// Like count
    #[serde(default)]
    pub like_count: u64,
    /// Comment count
    #[serde(default)]
    pub comment_count: u64,
    /// Shown in the featured strip
    #[serde(default)]
    pub is_featured: bool,
    /// Visible on public pages
    #[serde(default)]
    pub is_approved: bool,
    /// Hidden by a moderator
    #[serde(default)]
    pub is_hidden: bool,
    /// Keywords that made the sync function pick this video
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    /// Row creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Video {
    /// Public watch URL on YouTube.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Publication state of a blog post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Work in progress, never shown publicly
    #[default]
    Draft,
    /// Visible on public pages
    Published,
    /// Withdrawn from public pages
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    /// Row id
    pub id: String,
    /// Article title
    pub title: String,
    /// URL slug (unique)
    pub slug: String,
    /// Article body (markdown/HTML)
    #[serde(default)]
    pub content: String,
    /// Short summary shown on listing cards
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Hero image URL
    #[serde(default)]
    pub featured_image_url: Option<String>,
    /// Profile id of the author
    #[serde(default)]
    pub author_id: Option<String>,
    /// Publication state
    #[serde(default)]
    pub status: PostStatus,
    /// Read count
    #[serde(default)]
    pub view_count: u64,
    /// Shown in the featured strip
    #[serde(default)]
    pub is_featured: bool,
    /// Free-form tags (also used as categories)
    #[serde(default)]
    pub tags: Vec<String>,
    /// SEO title override
    #[serde(default)]
    pub seo_title: Option<String>,
    /// SEO description override
    #[serde(default)]
    pub seo_description: Option<String>,
    /// Time the post was published
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Row creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable fields of a blog post, used for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BlogPostDraft {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

impl BlogPostDraft {
    /// Reject drafts the listing pages could not render.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::invalid("title", "must not be empty"));
        }
        let slug = self.slug.trim();
        if slug.is_empty() {
            return Err(ContentError::invalid("slug", "must not be empty"));
        }
        if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return Err(ContentError::invalid(
                "slug",
                "only lowercase letters, digits and '-' are allowed",
            ));
        }
        Ok(())
    }
}

/// Derive a URL slug from a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// A YouTube channel whose uploads are synced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YouTubeChannel {
    /// Row id
    #[serde(default)]
    pub id: String,
    /// YouTube channel id (`UC...`)
    pub channel_id: String,
    /// Channel title
    pub channel_name: String,
    /// Channel description
    #[serde(default)]
    pub channel_description: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub channel_thumbnail: Option<String>,
    /// Subscriber count at the time of the last lookup
    #[serde(default)]
    pub subscriber_count: u64,
    /// Upload count at the time of the last lookup
    #[serde(default)]
    pub video_count: u64,
    /// Included in remote syncs
    #[serde(default)]
    pub is_active: bool,
    /// Row creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Triage state of a contact form submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
    Responded,
    Archived,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Responded => "responded",
            Self::Archived => "archived",
        }
    }
}

/// A stored contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Shortest accepted contact message, after trimming.
pub const MIN_CONTACT_MESSAGE_CHARS: usize = 10;

/// Public contact form input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    /// Validate and return a trimmed copy.
    pub fn normalized(&self) -> Result<Self, ContentError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContentError::invalid("name", "must not be empty"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {},
            _ => return Err(ContentError::invalid("email", "must be a valid address")),
        }
        let message = self.message.trim();
        if message.chars().count() < MIN_CONTACT_MESSAGE_CHARS {
            return Err(ContentError::invalid(
                "message",
                format!("must be at least {} characters long", MIN_CONTACT_MESSAGE_CHARS),
            ));
        }
        let subject =
            self.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            subject,
            message: message.to_string(),
        })
    }
}

/// Aggregate numbers shown on the public landing page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SiteStats {
    /// Approved videos
    pub total_videos: u64,
    /// Sum of view counts over approved videos and published posts
    pub total_views: u64,
    /// Published blog posts
    pub total_posts: u64,
    /// Channels included in syncs
    pub active_channels: u64,
}

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub channels: u64,
    pub videos: u64,
    pub blog_posts: u64,
    pub contact_submissions: u64,
    pub featured_videos: u64,
    pub published_posts: u64,
}
