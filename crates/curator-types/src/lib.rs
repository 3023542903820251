//! # Curator Types
//!
//! Core types, models, and error definitions for BCH Curator.
//!
//! This crate provides the foundational type system for the curator workspace:
//!
//! - **`error`** - Typed error hierarchy for configuration and content
//! - **`models`** - Domain models (Video, BlogPost, Channel, SyncStatus, QueryFilter)
//!
//! ## Architecture Role
//!
//! `curator-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!                curator-types (this crate)
//!                        │
//!       ┌────────────────┼────────────────┐
//!       ▼                ▼                │
//! curator-client    curator-core ◄────────┘
//!       │                │
//!       └────────┬───────┘
//!                ▼
//!         curator-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API responses and backend rows
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, ContentError, Result, TypedError};

// Re-export core model types
pub use models::{
    BlogPost, BlogPostDraft, ContactRequest, ContactStatus, ContactSubmission, ContentType,
    DashboardCounts, KeepAliveOutcome, Page, PostStatus, QueryFilter, SiteStats, SortKey,
    SyncConfig, SyncOutcome, SyncReport, SyncStatus, Video, YouTubeChannel,
};
