#![allow(clippy::unwrap_used, reason = "test code")]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use curator_core::modules::content::CONTACT_FUNCTION;
use curator_core::test_utils::FakeReply;
use curator_types::models::{ContactRequest, SortKey};
use serde_json::json;

use super::content::{
    blog_tags, featured, get_post, get_video, list_posts, list_videos, site_stats, submit_contact,
    LatestParams, ListingParams,
};
use crate::test_helpers::test_app_state;

fn seed_content(backend: &curator_core::test_utils::FakeBackend) {
    backend.seed(
        "videos",
        (1..=14)
            .map(|i| {
                json!({
                    "id": format!("v{i}"),
                    "video_id": format!("vid{i:08}"),
                    "title": format!("Episode {i}"),
                    "description": "Bitcoin Cash weekly",
                    "publish_date": format!("2025-02-{:02}T00:00:00Z", i),
                    "view_count": i * 3,
                    "is_approved": i != 14,
                    "is_featured": i <= 2,
                })
            })
            .collect(),
    );
    backend.seed(
        "blog_posts",
        vec![
            json!({ "id": "p1", "title": "Halving", "slug": "halving", "status": "published",
                    "tags": ["mining"], "view_count": 4, "is_featured": true }),
            json!({ "id": "p2", "title": "Tokens", "slug": "tokens", "status": "published",
                    "tags": ["tokens", "mining"], "view_count": 1 }),
            json!({ "id": "p3", "title": "Secret", "slug": "secret", "status": "draft",
                    "tags": ["drafts"] }),
        ],
    );
}

#[tokio::test]
async fn test_list_videos_defaults_to_video_page_size() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let Json(page) = list_videos(State(state), Query(ListingParams::default())).await.unwrap();
    assert_eq!(page.total_count, 13, "unapproved video excluded");
    assert_eq!(page.page_size, 12);
    assert_eq!(page.items.len(), 12);
    assert_eq!(page.items[0].title, "Episode 13");
}

#[tokio::test]
async fn test_list_videos_second_page_by_views() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let params = ListingParams { sort: SortKey::ViewCount, page: Some(2), ..Default::default() };
    let Json(page) = list_videos(State(state), Query(params)).await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Episode 1", "lowest view count lands last");
}

#[tokio::test]
async fn test_list_videos_failure_is_generic() {
    let (state, backend) = test_app_state();
    backend.fail_selects_on("videos", 500, "relation does not exist");

    let err = list_videos(State(state), Query(ListingParams::default())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.message, "Failed to load videos");
}

#[tokio::test]
async fn test_list_posts_uses_blog_page_size_and_tag() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let params = ListingParams { tag: Some("tokens".to_string()), ..Default::default() };
    let Json(page) = list_posts(State(state), Query(params)).await.unwrap();
    assert_eq!(page.page_size, 9);
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].slug, "tokens");
}

#[tokio::test]
async fn test_search_without_matches_is_an_empty_page() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let params = ListingParams { search: "no such thing".to_string(), ..Default::default() };
    let Json(page) = list_posts(State(state), Query(params)).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_latest_limit_is_clamped() {
    let params = LatestParams { limit: Some(0) };
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let Json(videos) =
        super::content::latest_videos(State(state), Query(params)).await.unwrap();
    assert_eq!(videos.len(), 1);
}

#[tokio::test]
async fn test_detail_lookups() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let Json(video) =
        get_video(State(state.clone()), Path("vid00000003".to_string())).await.unwrap();
    assert_eq!(video.title, "Episode 3");

    let err = get_video(State(state.clone()), Path("vid00000014".to_string())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND, "unapproved videos are not public");

    let Json(post) = get_post(State(state.clone()), Path("halving".to_string())).await.unwrap();
    assert_eq!(post.view_count, 5);

    let err = get_post(State(state), Path("secret".to_string())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tags_featured_and_stats() {
    let (state, backend) = test_app_state();
    seed_content(&backend);

    let Json(tags) = blog_tags(State(state.clone())).await.unwrap();
    assert_eq!(tags.tags, vec!["mining".to_string(), "tokens".to_string()]);

    let Json(strip) = featured(State(state.clone())).await.unwrap();
    assert_eq!(strip.videos.len(), 2);
    assert_eq!(strip.posts.len(), 1);

    let Json(stats) = site_stats(State(state)).await.unwrap();
    assert_eq!(stats.total_videos, 13);
    assert_eq!(stats.total_posts, 2);
}

#[tokio::test]
async fn test_contact_submission() {
    let (state, backend) = test_app_state();
    let request = ContactRequest {
        name: "Satoshi".to_string(),
        email: "satoshi@example.org".to_string(),
        subject: None,
        message: "Please cover CashTokens".to_string(),
    };

    let (status, Json(body)) =
        submit_contact(State(state.clone()), Json(request.clone())).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.success);
    assert_eq!(backend.invocations(CONTACT_FUNCTION).len(), 1);

    backend.push_reply(CONTACT_FUNCTION, FakeReply::Status(500, "mailer down".to_string()));
    let err = submit_contact(State(state), Json(request)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_contact_validation_is_unprocessable() {
    let (state, backend) = test_app_state();
    let request = ContactRequest {
        name: "Satoshi".to_string(),
        email: "satoshi@example.org".to_string(),
        subject: None,
        message: "hi".to_string(),
    };

    let err = submit_contact(State(state), Json(request)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.invocations(CONTACT_FUNCTION).is_empty());
}
