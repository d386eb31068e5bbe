/// Persistent store abstraction
///
/// `PersistentStore` is the named capability set the core consumes; the
/// Postgres adapter in `postgres` is the production implementation and
/// tests substitute an in-memory one. Every method is a single-key atomic
/// operation; no multi-key transactions are required because the cross
/// entity invariant (like-row existence vs. post counter) is maintained by
/// paired atomic calls.
pub mod postgres;

pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Category, Post};

/// One store-ordered page of posts plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<Post>,
    pub total: i64,
}

#[async_trait]
pub trait PersistentStore: Send + Sync {
    async fn category_exists(&self, category_id: Uuid) -> Result<bool>;

    async fn create_post(
        &self,
        author_id: &str,
        category_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post>;

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Posts in the fixed, index-covered base order of (like_count DESC,
    /// created_at DESC), optionally filtered to one category.
    async fn find_feed_page(
        &self,
        category_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<FeedPage>;

    /// Insert-if-absent on the (user, post) unique pair. Returns whether a
    /// row was created.
    async fn insert_like_if_absent(&self, user_id: &str, post_id: Uuid) -> Result<bool>;

    /// Delete-if-present on the (user, post) pair. Returns whether a row
    /// was deleted.
    async fn delete_like_if_present(&self, user_id: &str, post_id: Uuid) -> Result<bool>;

    /// Atomic ±delta adjustment of the denormalized like counter.
    async fn increment_like_count(&self, post_id: Uuid, delta: i64) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
}
