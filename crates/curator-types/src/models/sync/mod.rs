//! Auto-Sync Types
//!
//! Configuration and observable state of the background scheduler that
//! keeps the hosted backend awake and periodically runs the remote video
//! sync function.
//!
//! # Lifecycle
//!
//! - `SyncConfig` is supplied when the scheduler starts and stays fixed for
//!   that run; changing it restarts the timers.
//! - `SyncStatus` starts empty and is rewritten after every keep-alive or
//!   sync attempt. It is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;


/// Default minutes between remote video syncs.
pub const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 30;
/// Default minutes between keep-alive pings.
pub const DEFAULT_KEEP_ALIVE_INTERVAL_MINUTES: u64 = 5;
/// Longest accepted interval for either timer (one week).
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    DEFAULT_SYNC_INTERVAL_MINUTES
}

fn default_keep_alive_interval() -> u64 {
    DEFAULT_KEEP_ALIVE_INTERVAL_MINUTES
}

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// When false, starting the scheduler registers no timers at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Minutes between remote video syncs
    #[serde(default = "default_interval")]
    pub interval_minutes: u64,
    /// Minutes between keep-alive pings
    #[serde(default = "default_keep_alive_interval")]
    pub keep_alive_interval_minutes: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_minutes: default_interval(),
            keep_alive_interval_minutes: default_keep_alive_interval(),
        }
    }
}

fn check_interval(field: &str, minutes: u64) -> Result<(), ConfigError> {
    if minutes == 0 {
        return Err(ConfigError::invalid(field, "must be greater than zero"));
    }
    if minutes > MAX_INTERVAL_MINUTES {
        return Err(ConfigError::invalid(
            field,
            format!("must be at most {} minutes", MAX_INTERVAL_MINUTES),
        ));
    }
    Ok(())
}

impl SyncConfig {
    /// A config that never schedules anything.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }

    /// Both intervals must lie in `1..=MAX_INTERVAL_MINUTES`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_interval("interval_minutes", self.interval_minutes)?;
        check_interval("keep_alive_interval_minutes", self.keep_alive_interval_minutes)
    }

    pub fn sync_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    pub fn keep_alive_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.keep_alive_interval_minutes.saturating_mul(60))
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SyncStatus {
    /// Completion time of the last successful sync
    pub last_sync_time: Option<DateTime<Utc>>,
    /// Completion time of the last successful keep-alive
    pub last_keep_alive_time: Option<DateTime<Utc>>,
    /// A sync call is in flight
    pub is_syncing: bool,
    /// Message of the most recent failure, cleared by the next success
    pub error: Option<String>,
    /// Successful syncs since the scheduler was created
    pub success_count: u64,
}

/// Result body of the remote video sync function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Reported by the function; a `false` here counts as a failed sync
    #[serde(default)]
    pub success: bool,
    /// Videos inserted by this run
    #[serde(default, alias = "newItemsCount")]
    pub new_videos_count: u64,
    /// Channels the function walked through
    #[serde(default)]
    pub channels_processed: Option<u64>,
    /// Human-readable summary
    #[serde(default)]
    pub message: Option<String>,
    /// Failure message when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

/// What a single `sync()` call did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The remote function ran and reported success
    Completed {
        /// The function's report
        report: SyncReport,
    },
    /// Another sync was already in flight; nothing was done
    Skipped,
    /// The call failed; the message is also recorded in `SyncStatus::error`
    Failed {
        /// Recorded error message
        error: String,
    },
}

/// What a single `keep_alive()` call did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KeepAliveOutcome {
    /// The backend answered
    Alive,
    /// The read failed; the message is also recorded in `SyncStatus::error`
    Failed {
        /// Recorded error message
        error: String,
    },
}

/// Compact "time since" label used by the status indicator
/// (`"never"`, `"42s ago"`, `"5m ago"`, `"3h ago"`).
pub fn format_time_since(time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(time) = time else {
        return "never".to_string();
    };
    let seconds = (now - time).num_seconds().max(0);
    if seconds < 60 {
        return format!("{}s ago", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    format!("{}h ago", minutes / 60)
}
