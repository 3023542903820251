#![allow(clippy::unwrap_used, reason = "test code")]

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use curator_core::scheduler::SYNC_FUNCTION;
use curator_core::test_utils::FakeReply;
use curator_types::models::{KeepAliveOutcome, SyncConfig, SyncOutcome};
use serde_json::json;

use super::sync::{
    force_keep_alive, force_sync, get_sync_config, get_sync_status, keep_alive, update_sync_config,
};
use crate::test_helpers::test_app_state;

#[tokio::test]
async fn test_keep_alive_endpoint() {
    let (state, backend) = test_app_state();

    let (status, Json(body)) = keep_alive(State(state.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Database ping successful");

    backend.fail_selects_on("youtube_channels", 503, "project paused");
    let (status, Json(body)) = keep_alive(State(state)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Ping failed");
}

#[tokio::test]
async fn test_public_ping_leaves_sync_status_alone() {
    let (state, backend) = test_app_state();
    backend.push_reply(SYNC_FUNCTION, FakeReply::Status(500, "quota exceeded".to_string()));
    force_sync(State(state.clone())).await;
    let before = state.scheduler().status();
    assert!(before.error.as_deref().is_some_and(|e| e.contains("quota exceeded")));

    let (status, _) = keep_alive(State(state.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let after = state.scheduler().status();
    assert_eq!(after, before);
    assert!(after.last_keep_alive_time.is_none());
}

#[tokio::test]
async fn test_status_starts_empty() {
    let (state, _backend) = test_app_state();

    let Json(status) = get_sync_status(State(state)).await;
    assert_eq!(status.last_sync_label, "never");
    assert_eq!(status.last_keep_alive_label, "never");
    assert_eq!(status.success_count, 0);
    assert!(!status.is_syncing);
    assert!(!status.auto_sync);
    assert!(status.config.is_none());
}

#[tokio::test]
async fn test_force_sync_updates_status() {
    let (state, backend) = test_app_state();
    backend.push_reply(
        SYNC_FUNCTION,
        FakeReply::Json(json!({ "success": true, "newVideosCount": 3, "channelsProcessed": 2 })),
    );

    let (status, Json(outcome)) = force_sync(State(state.clone())).await;
    assert_eq!(status, StatusCode::OK);
    match outcome {
        SyncOutcome::Completed { report } => assert_eq!(report.new_videos_count, 3),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let Json(status) = get_sync_status(State(state)).await;
    assert_eq!(status.success_count, 1);
    assert!(status.last_sync_time.is_some());
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_force_sync_failure_is_bad_gateway() {
    let (state, backend) = test_app_state();
    backend.push_reply(SYNC_FUNCTION, FakeReply::Status(500, "boom".to_string()));

    let (status, Json(outcome)) = force_sync(State(state.clone())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(matches!(outcome, SyncOutcome::Failed { .. }));

    let Json(status) = get_sync_status(State(state)).await;
    assert_eq!(status.error.as_deref(), Some("Sync failed: Backend error (500): boom"));
}

#[tokio::test]
async fn test_force_keep_alive() {
    let (state, backend) = test_app_state();

    let (status, Json(outcome)) = force_keep_alive(State(state.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, KeepAliveOutcome::Alive);

    backend.fail_selects_on("youtube_channels", 500, "down");
    let (status, Json(outcome)) = force_keep_alive(State(state)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(matches!(outcome, KeepAliveOutcome::Failed { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_update_config_restarts_timers() {
    let (state, _backend) = test_app_state();

    let Json(before) = get_sync_config(State(state.clone())).await;
    assert!(!before.enabled);

    let config = SyncConfig { enabled: true, interval_minutes: 15, keep_alive_interval_minutes: 2 };
    let Json(applied) = update_sync_config(State(state.clone()), Json(config)).await.unwrap();
    assert_eq!(applied, config);
    assert!(state.scheduler().is_running());

    let Json(current) = get_sync_config(State(state.clone())).await;
    assert_eq!(current.interval_minutes, 15);

    let disabled = SyncConfig::disabled();
    update_sync_config(State(state.clone()), Json(disabled)).await.unwrap();
    assert!(!state.scheduler().is_running());
}

#[tokio::test(start_paused = true)]
async fn test_update_config_rejects_zero_interval() {
    let (state, _backend) = test_app_state();

    let config = SyncConfig { enabled: true, interval_minutes: 0, keep_alive_interval_minutes: 5 };
    let err = update_sync_config(State(state.clone()), Json(config)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!state.scheduler().is_running());
}

#[tokio::test(start_paused = true)]
async fn test_update_config_rejects_oversized_interval() {
    let (state, _backend) = test_app_state();

    let config =
        SyncConfig { enabled: true, interval_minutes: u64::MAX, keep_alive_interval_minutes: 5 };
    let err = update_sync_config(State(state.clone()), Json(config)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err.message.contains("interval_minutes"));
    assert!(!state.scheduler().is_running());
}
