//! Test helpers for curator-server unit tests.

use std::sync::Arc;

use curator_core::test_utils::{FakeBackend, FakeDirectory, ManualClock};
use curator_core::{AdminService, SyncScheduler};

use crate::state::AppState;

pub const TEST_ADMIN_KEY: &str = "test-admin-key";

/// Create an `AppState` over an in-memory backend.
///
/// Returns the backend too, so tests can seed rows and inspect writes.
pub fn test_app_state() -> (AppState, Arc<FakeBackend>) {
    test_app_state_with_directory(FakeDirectory::default())
}

pub fn test_app_state_with_directory(directory: FakeDirectory) -> (AppState, Arc<FakeBackend>) {
    let backend = Arc::new(FakeBackend::new());
    let admin = AdminService::new(backend.clone()).with_directory(Arc::new(directory));
    let scheduler = Arc::new(SyncScheduler::new(backend.clone(), Arc::new(ManualClock::fixed())));
    let state = AppState::new(backend.clone(), admin, scheduler, Some(TEST_ADMIN_KEY.to_string()));
    (state, backend)
}
