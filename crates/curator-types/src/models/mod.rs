//! Core domain models for BCH Curator.
//!
//! This module contains all shared data structures used across the curator workspace.

mod content;
mod query;
mod sync;

// Re-export all models
pub use content::{
    slugify, BlogPost, BlogPostDraft, ContactRequest, ContactStatus, ContactSubmission,
    DashboardCounts, PostStatus, SiteStats, Video, YouTubeChannel, MIN_CONTACT_MESSAGE_CHARS,
};
pub use query::{ContentType, Page, QueryFilter, SortKey, POSTS_PER_PAGE, VIDEOS_PER_PAGE};
pub use sync::{
    format_time_since, KeepAliveOutcome, SyncConfig, SyncOutcome, SyncReport, SyncStatus,
    DEFAULT_KEEP_ALIVE_INTERVAL_MINUTES, DEFAULT_SYNC_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES,
};
