//! Application State
//!
//! Holds the content/admin services, the sync scheduler, and the admin key.

use std::sync::Arc;

use curator_core::{AdminService, Backend, ContentService, SyncScheduler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub content: ContentService,
    pub admin: AdminService,
    pub scheduler: Arc<SyncScheduler>,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn Backend>,
        admin: AdminService,
        scheduler: Arc<SyncScheduler>,
        admin_key: Option<String>,
    ) -> Self {
        let admin_key = admin_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        Self {
            inner: Arc::new(AppStateInner {
                content: ContentService::new(backend),
                admin,
                scheduler,
                admin_key,
            }),
        }
    }

    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }

    pub fn scheduler(&self) -> &SyncScheduler {
        &self.inner.scheduler
    }

    pub fn admin_key(&self) -> Option<&str> {
        self.inner.admin_key.as_deref()
    }
}
