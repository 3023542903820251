//! Background Sync Scheduler
//!
//! Keeps the hosted backend awake and periodically runs the remote video
//! sync function.
//!
//! Timeline of one run (`start` with an enabled config):
//! - `t = 0`: one keep-alive ping, fire-and-forget
//! - every `keep_alive_interval_minutes`: keep-alive ping
//! - `t = 60s`: first sync (warm-up delay)
//! - every `interval_minutes`: sync
//!
//! Failures never stop the timers and there is no backoff: the next tick
//! simply tries again. Each tick runs its job as a separate task, so
//! `stop()` cancels pending ticks but never an in-flight call.

mod clock;

pub use clock::{Clock, SystemClock};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use curator_client::{ClientError, RemoteQuery};
use curator_types::{ConfigError, KeepAliveOutcome, SyncConfig, SyncOutcome, SyncReport, SyncStatus};
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use crate::modules::backend::Backend;

/// Delay between `start` and the first sync.
pub const SYNC_WARMUP: Duration = Duration::from_secs(60);
/// Table read by the keep-alive ping.
pub const KEEP_ALIVE_TABLE: &str = "youtube_channels";
/// Remote function that pulls new videos from the tracked channels.
pub const SYNC_FUNCTION: &str = "youtube-video-sync";

#[derive(Debug, Clone, Copy)]
enum Job {
    KeepAlive,
    Sync,
}

impl Job {
    /// Run the job detached from the timer that fired it.
    fn spawn(self, inner: Arc<Inner>) {
        tokio::spawn(async move {
            match self {
                Self::KeepAlive => {
                    inner.keep_alive().await;
                },
                Self::Sync => {
                    inner.sync().await;
                },
            }
        });
    }
}

struct Inner {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    status: watch::Sender<SyncStatus>,
    syncing: AtomicBool,
}

impl Inner {
    async fn keep_alive(&self) -> KeepAliveOutcome {
        let query = RemoteQuery::from(KEEP_ALIVE_TABLE).select("id").limit(1);
        match self.backend.select(&query).await {
            Ok(_) => {
                let now = self.clock.now();
                self.status.send_modify(|s| {
                    s.last_keep_alive_time = Some(now);
                    s.error = None;
                });
                tracing::debug!("[Scheduler] Keep-alive successful");
                KeepAliveOutcome::Alive
            },
            Err(e) => {
                let error = format!("Keep-alive failed: {}", e);
                tracing::warn!("[Scheduler] {}", error);
                self.status.send_modify(|s| s.error = Some(error.clone()));
                KeepAliveOutcome::Failed { error }
            },
        }
    }

    async fn sync(&self) -> SyncOutcome {
        let claimed =
            self.syncing.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire);
        if claimed.is_err() {
            tracing::info!("[Scheduler] Sync already in progress, skipping");
            return SyncOutcome::Skipped;
        }

        tracing::info!("[Scheduler] Starting video sync");
        self.status.send_modify(|s| {
            s.is_syncing = true;
            s.error = None;
        });

        let result = self.run_sync().await;
        self.syncing.store(false, Ordering::Release);

        match result {
            Ok(report) => {
                let now = self.clock.now();
                self.status.send_modify(|s| {
                    s.last_sync_time = Some(now);
                    s.is_syncing = false;
                    s.error = None;
                    s.success_count += 1;
                });
                tracing::info!(
                    "[Scheduler] Sync completed: {} new videos",
                    report.new_videos_count
                );
                SyncOutcome::Completed { report }
            },
            Err(e) => {
                let error = format!("Sync failed: {}", e);
                tracing::warn!("[Scheduler] {}", error);
                self.status.send_modify(|s| {
                    s.is_syncing = false;
                    s.error = Some(error.clone());
                });
                if e.is_suspension() {
                    tracing::warn!("[Scheduler] Backend appears to be paused, sending keep-alive");
                    self.keep_alive().await;
                }
                SyncOutcome::Failed { error }
            },
        }
    }

    async fn run_sync(&self) -> Result<SyncReport, ClientError> {
        let body = self.backend.invoke(SYNC_FUNCTION, None).await?;
        parse_report(body)
    }
}

/// A body with `success: false` is a failure even on a 2xx response.
/// Any other body counts as success; unknown shapes yield an empty report.
fn parse_report(body: Value) -> Result<SyncReport, ClientError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = ["error", "message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or("function reported failure")
            .to_string();
        return Err(ClientError::Function { function: SYNC_FUNCTION.to_string(), message });
    }
    let mut report: SyncReport = serde_json::from_value(body).unwrap_or_default();
    report.success = true;
    Ok(report)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the keep-alive and sync timers and the observable [`SyncStatus`].
pub struct SyncScheduler {
    inner: Arc<Inner>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    config: Mutex<Option<SyncConfig>>,
}

impl SyncScheduler {
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        let (status, _) = watch::channel(SyncStatus::default());
        Self {
            inner: Arc::new(Inner { backend, clock, status, syncing: AtomicBool::new(false) }),
            timers: Mutex::new(Vec::new()),
            config: Mutex::new(None),
        }
    }

    pub fn with_system_clock(backend: Arc<dyn Backend>) -> Self {
        Self::new(backend, Arc::new(SystemClock))
    }

    /// Start (or restart) the timers for `config`.
    ///
    /// A disabled config registers nothing and performs no calls. An
    /// invalid config is rejected and leaves the current run untouched.
    /// Must be called from within a tokio runtime.
    pub fn start(&self, config: SyncConfig) -> Result<watch::Receiver<SyncStatus>, ConfigError> {
        if config.enabled {
            config.validate()?;
        }
        self.stop();
        *lock(&self.config) = Some(config);

        if !config.enabled {
            tracing::info!("[Scheduler] Auto-sync disabled");
            return Ok(self.subscribe());
        }

        tracing::info!(
            "[Scheduler] Auto-sync enabled (sync every {}m, keep-alive every {}m)",
            config.interval_minutes,
            config.keep_alive_interval_minutes
        );

        // Not tracked: stopping right after start must not cancel the first ping.
        Job::KeepAlive.spawn(Arc::clone(&self.inner));

        let warmup_inner = Arc::clone(&self.inner);
        let warmup = tokio::spawn(async move {
            sleep(SYNC_WARMUP).await;
            Job::Sync.spawn(warmup_inner);
        });

        *lock(&self.timers) = vec![
            self.spawn_periodic(config.keep_alive_period(), Job::KeepAlive),
            warmup,
            self.spawn_periodic(config.sync_period(), Job::Sync),
        ];
        Ok(self.subscribe())
    }

    fn spawn_periodic(&self, period: Duration, job: Job) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job.spawn(Arc::clone(&inner));
            }
        })
    }

    /// Cancel all pending ticks. Safe to call repeatedly.
    pub fn stop(&self) {
        let timers = std::mem::take(&mut *lock(&self.timers));
        if timers.is_empty() {
            return;
        }
        for timer in timers {
            timer.abort();
        }
        tracing::info!("[Scheduler] Auto-sync stopped");
    }

    /// Restart the timers with a new config.
    pub fn apply_config(
        &self,
        config: SyncConfig,
    ) -> Result<watch::Receiver<SyncStatus>, ConfigError> {
        self.start(config)
    }

    pub fn is_running(&self) -> bool {
        !lock(&self.timers).is_empty()
    }

    /// Config of the current (or last) run.
    pub fn config(&self) -> Option<SyncConfig> {
        *lock(&self.config)
    }

    /// One keep-alive ping. Never fails; the outcome is also recorded in
    /// the status.
    pub async fn keep_alive(&self) -> KeepAliveOutcome {
        self.inner.keep_alive().await
    }

    /// One sync attempt, skipped if another is already in flight.
    pub async fn sync(&self) -> SyncOutcome {
        self.inner.sync().await
    }

    /// Manual sync trigger from the admin API.
    pub async fn force_sync(&self) -> SyncOutcome {
        tracing::info!("[Scheduler] Manual sync requested");
        self.inner.sync().await
    }

    /// Manual keep-alive trigger from the admin API.
    pub async fn force_keep_alive(&self) -> KeepAliveOutcome {
        tracing::info!("[Scheduler] Manual keep-alive requested");
        self.inner.keep_alive().await
    }

    pub fn status(&self) -> SyncStatus {
        self.inner.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.inner.status.subscribe()
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
