//! Like/dislike toggling: idempotency, counter pairing, cache invalidation.

mod common;

use std::sync::Arc;
use uuid::Uuid;

use common::{MemoryCounterStore, MemoryStore};
use tea_feed::cache::{keys, ContentCache, CounterStore};
use tea_feed::db::PersistentStore;
use tea_feed::error::AppError;
use tea_feed::services::PostService;

fn setup() -> (Arc<MemoryStore>, Arc<MemoryCounterStore>, PostService) {
    let store = Arc::new(MemoryStore::new());
    let counter = Arc::new(MemoryCounterStore::new());
    let cache = Arc::new(ContentCache::new(counter.clone(), 300, 60, 300));
    let service = PostService::new(store.clone(), cache);
    (store, counter, service)
}

#[tokio::test]
async fn like_is_idempotent_per_user_and_post() {
    let (store, _counter, service) = setup();
    let category_id = store.add_category("Science");
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    assert!(service.like("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 1);

    assert!(!service.like("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 1);
}

#[tokio::test]
async fn dislike_without_prior_like_changes_nothing() {
    let (store, _counter, service) = setup();
    let category_id = store.add_category("Science");
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    assert!(!service.dislike("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 0);
}

#[tokio::test]
async fn like_then_dislike_round_trip() {
    let (store, _counter, service) = setup();
    let category_id = store.add_category("Science");
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    assert!(service.like("u1", post.id).await.unwrap());
    assert!(service.dislike("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 0);

    // A second dislike finds no like row.
    assert!(!service.dislike("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 0);
}

#[tokio::test]
async fn like_of_missing_post_is_not_found() {
    let (_store, _counter, service) = setup();

    match service.like("u1", Uuid::new_v4()).await {
        Err(AppError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn mutation_invalidates_post_and_feed_cache_entries() {
    let (store, counter, service) = setup();
    let category_id = store.add_category("Science");
    let other_category = Uuid::new_v4();
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    // Simulate previously cached entries.
    let post_key = keys::post(post.id);
    let cat_feed_key = keys::feed_page(Some(category_id), true, 1, 10);
    let all_feed_key = keys::feed_page(None, false, 1, 10);
    let unrelated_feed_key = keys::feed_page(Some(other_category), true, 1, 10);
    for key in [&post_key, &cat_feed_key, &all_feed_key, &unrelated_feed_key] {
        counter.set(key, "{}", 60).await.unwrap();
    }

    service.like("u1", post.id).await.unwrap();

    assert!(!counter.contains_key(&post_key));
    assert!(!counter.contains_key(&cat_feed_key));
    assert!(!counter.contains_key(&all_feed_key));
    // Feed pages of other categories stay cached.
    assert!(counter.contains_key(&unrelated_feed_key));
}

#[tokio::test]
async fn get_post_is_served_from_cache_after_first_read() {
    let (store, _counter, service) = setup();
    let category_id = store.add_category("Science");
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    let first = service.get_post(post.id).await.unwrap().unwrap();
    store.increment_like_count(post.id, 5).await.unwrap();

    // Still the cached snapshot: no invalidation has happened.
    let second = service.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(second.like_count, first.like_count);

    // After a like, the cache entry is gone and the fresh row is visible.
    service.like("u1", post.id).await.unwrap();
    let third = service.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(third.like_count, 6);
}

#[tokio::test]
async fn create_post_rejects_unknown_category() {
    let (_store, _counter, service) = setup();

    match service
        .create_post("author", Uuid::new_v4(), "title", "content")
        .await
    {
        Err(AppError::Validation(_)) => {}
        other => panic!("expected Validation, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn invalidation_failure_does_not_fail_the_like() {
    let (store, counter, service) = setup();
    let category_id = store.add_category("Science");
    let post = service
        .create_post("author", category_id, "title", "content")
        .await
        .unwrap();

    counter.set_failing(true);
    assert!(service.like("u1", post.id).await.unwrap());
    assert_eq!(store.like_count(post.id), 1);
}
