//! # Curator Core
//!
//! Business logic for BCH Curator.
//!
//! ## Architecture
//!
//! ```text
//! curator-core/src/
//! ├── modules/
//! │   ├── backend.rs        # Backend + ChannelDirectory traits
//! │   ├── query_builder.rs  # QueryFilter -> RemoteQuery (pure)
//! │   ├── content.rs        # Public read side
//! │   ├── admin.rs          # Moderation
//! │   └── logger.rs         # tracing-subscriber setup
//! ├── scheduler/            # Keep-alive + video sync timers
//! └── error.rs              # AppError
//! ```
//!
//! Everything talks to the hosted backend through [`Backend`], implemented
//! for [`curator_client::SupabaseClient`] and, in tests, by
//! `test_utils::FakeBackend`.

#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::indexing_slicing,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod modules;
pub mod scheduler;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{AppError, AppResult};
pub use modules::admin::{AdminListQuery, AdminService, VideoListFilter};
pub use modules::backend::{Backend, ChannelDirectory};
pub use modules::content::{ContentService, FeaturedContent};
pub use modules::query_builder::build_query;
pub use scheduler::{Clock, SyncScheduler, SystemClock};
