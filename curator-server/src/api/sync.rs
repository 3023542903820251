//! Keep-alive ping, sync status indicator, and admin sync controls.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use curator_types::models::{format_time_since, KeepAliveOutcome, SyncConfig, SyncOutcome};
use serde::Serialize;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Status indicator payload: the raw status plus relative-time labels.
#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub last_sync_time: Option<DateTime<Utc>>,
    pub last_keep_alive_time: Option<DateTime<Utc>>,
    pub last_sync_label: String,
    pub last_keep_alive_label: String,
    pub is_syncing: bool,
    pub error: Option<String>,
    pub success_count: u64,
    pub auto_sync: bool,
    pub config: Option<SyncConfig>,
}

/// `GET /api/keep-alive`: one narrow read so the backend stays awake.
/// Public, so it does not go through the scheduler or touch its status.
pub async fn keep_alive(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.content().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "Database ping successful" }))),
        Err(e) => {
            tracing::warn!("[API] Keep-alive ping failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Ping failed" })))
        },
    }
}

pub async fn get_sync_status(State(state): State<AppState>) -> Json<SyncStatusResponse> {
    let scheduler = state.scheduler();
    let status = scheduler.status();
    let now = Utc::now();

    Json(SyncStatusResponse {
        last_sync_label: format_time_since(status.last_sync_time, now),
        last_keep_alive_label: format_time_since(status.last_keep_alive_time, now),
        last_sync_time: status.last_sync_time,
        last_keep_alive_time: status.last_keep_alive_time,
        is_syncing: status.is_syncing,
        error: status.error,
        success_count: status.success_count,
        auto_sync: scheduler.is_running(),
        config: scheduler.config(),
    })
}

pub async fn get_sync_config(State(state): State<AppState>) -> Json<SyncConfig> {
    Json(state.scheduler().config().unwrap_or_else(SyncConfig::disabled))
}

/// Replace the timer configuration; the timers restart immediately.
pub async fn update_sync_config(
    State(state): State<AppState>,
    Json(config): Json<SyncConfig>,
) -> ApiResult<Json<SyncConfig>> {
    state
        .scheduler()
        .apply_config(config)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    tracing::info!(
        "[API] Sync config updated (enabled: {}, every {}m, keep-alive {}m)",
        config.enabled,
        config.interval_minutes,
        config.keep_alive_interval_minutes
    );
    Ok(Json(config))
}

/// Manual sync. A skipped run answers 409, a failed one 502.
pub async fn force_sync(State(state): State<AppState>) -> (StatusCode, Json<SyncOutcome>) {
    let outcome = state.scheduler().force_sync().await;
    let status = match &outcome {
        SyncOutcome::Completed { .. } => StatusCode::OK,
        SyncOutcome::Skipped => StatusCode::CONFLICT,
        SyncOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome))
}

pub async fn force_keep_alive(
    State(state): State<AppState>,
) -> (StatusCode, Json<KeepAliveOutcome>) {
    let outcome = state.scheduler().force_keep_alive().await;
    let status = match &outcome {
        KeepAliveOutcome::Alive => StatusCode::OK,
        KeepAliveOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome))
}
