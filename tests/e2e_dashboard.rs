//! E2E tests for the dashboard aggregator

mod common;

use common::TestCore;
use serde_json::json;

#[tokio::test]
async fn counts_reflect_the_seeded_tables() {
    let ctx = TestCore::new();
    ctx.sign_in_admin().await;

    ctx.store
        .seed("movies", json!({"id": "m-1", "title": "Heat"}))
        .await;
    ctx.store
        .seed("movies", json!({"id": "m-2", "title": "Ran"}))
        .await;
    ctx.store
        .seed(
            "live_channels",
            json!({"id": "c-1", "name": "News 24", "stream_url": "https://cdn/x.m3u8"}),
        )
        .await;
    ctx.seed_profile("user-1", "Ada").await;
    ctx.store
        .seed("categories", json!({"id": "cat-1", "name": "Drama", "slug": "drama"}))
        .await;

    let counts = ctx.core.dashboard().counts().await;
    assert_eq!(counts.movies, 2);
    assert_eq!(counts.channels, 1);
    assert_eq!(counts.users, 1);
    assert_eq!(counts.categories, 1);
}

#[tokio::test]
async fn empty_store_counts_are_all_zero() {
    let ctx = TestCore::new();

    let counts = ctx.core.dashboard().counts().await;
    assert_eq!(counts.movies, 0);
    assert_eq!(counts.channels, 0);
    assert_eq!(counts.users, 0);
    assert_eq!(counts.categories, 0);
}
