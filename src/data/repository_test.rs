//! Repository tests

use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::store::{Filter, InMemoryStore, Order, TableStore};

fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

#[tokio::test]
async fn empty_table_lists_empty() {
    let repo = Repository::<Category>::new(store());
    let rows = repo.list(None).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn insert_assigns_id_and_appears_in_list() {
    let repo = Repository::<Category>::new(store());

    let inserted = repo
        .insert(&CategoryDraft::from_name("Action Movies"))
        .await
        .unwrap();
    assert!(!inserted.id.is_empty());
    assert_eq!(inserted.slug, "action-movies");

    let rows = repo.list(None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Action Movies");
}

#[tokio::test]
async fn patch_changes_only_named_fields() {
    let repo = Repository::<Movie>::new(store());

    let movie = repo
        .insert(&MovieDraft {
            title: "Heat".to_string(),
            genre: Some("Crime".to_string()),
            release_year: Some(1995),
            ..MovieDraft::default()
        })
        .await
        .unwrap();

    let mut patch = crate::store::Row::new();
    patch.insert("title".to_string(), json!("Heat (Remastered)"));
    repo.patch(&movie.id, patch).await.unwrap();

    let updated = repo.get(&movie.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Heat (Remastered)");
    assert_eq!(updated.genre, Some("Crime".to_string()));
    assert_eq!(updated.release_year, Some(1995));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let repo = Repository::<Category>::new(store());
    let category = repo
        .insert(&CategoryDraft::from_name("Drama"))
        .await
        .unwrap();

    repo.delete(&category.id).await.unwrap();
    assert!(repo.get(&category.id).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn find_one_absence_is_none_not_error() {
    let repo = Repository::<ContactInfo>::new(store());
    let found = repo.find_one(Filter::new()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn list_orders_by_created_at_descending() {
    let store = store();
    store
        .seed(
            Category::TABLE,
            json!({"id": "a", "name": "Old", "slug": "old", "created_at": "2024-01-01T00:00:00Z"}),
        )
        .await;
    store
        .seed(
            Category::TABLE,
            json!({"id": "b", "name": "New", "slug": "new", "created_at": "2025-06-01T00:00:00Z"}),
        )
        .await;

    let repo = Repository::<Category>::new(store);
    let rows = repo.list(Some(Order::created_at_desc())).await.unwrap();
    assert_eq!(rows[0].name, "New");
    assert_eq!(rows[1].name, "Old");
}

#[tokio::test]
async fn malformed_row_is_rejected_at_the_boundary() {
    let store = store();
    // Missing the required `slug` column
    store
        .seed(Category::TABLE, json!({"id": "a", "name": "Broken"}))
        .await;

    let repo = Repository::<Category>::new(store);
    assert!(repo.list(None).await.is_err());
}

#[tokio::test]
async fn optional_fields_reach_the_store_as_nulls() {
    let store = store();
    let repo = Repository::<Channel>::new(Arc::clone(&store) as Arc<dyn crate::store::TableStore>);

    repo.insert(&ChannelDraft {
        name: "News 24".to_string(),
        description: Some("  ".to_string()),
        stream_url: "https://cdn.example.com/news.m3u8".to_string(),
        poster_url: None,
        category_id: None,
    })
    .await
    .unwrap();

    let raw = store
        .select(Channel::TABLE, &Filter::new(), None)
        .await
        .unwrap();
    assert!(raw[0].get("description").unwrap().is_null());
    assert!(raw[0].get("poster_url").unwrap().is_null());
}
