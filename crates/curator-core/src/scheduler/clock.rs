use chrono::{DateTime, Utc};

/// Source of wall-clock timestamps recorded in [`curator_types::SyncStatus`].
///
/// Timer scheduling uses tokio time; only the recorded timestamps come
/// from here, so tests can pin them.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
