/// Counter/cache store abstraction and caching layer
///
/// The `CounterStore` trait is the named capability set consumed by both
/// the read-through cache and the rate limiter. `redis` provides the
/// production adapter; tests supply an in-memory one.
pub mod content;
pub mod redis;

pub use content::ContentCache;
pub use self::redis::RedisCounterStore;

use async_trait::async_trait;

use crate::error::Result;

/// Key-addressable integer-counter / string-blob store with TTL support.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;
    async fn del(&self, keys: &[String]) -> Result<()>;
    async fn incr(&self, key: &str) -> Result<i64>;
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<()>;
    /// Enumerate keys matching a glob-style pattern (e.g. `cache:feed:cat:all:*`).
    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>>;
    async fn ping(&self) -> Result<()>;

    /// Increment and (re)set the TTL as one atomic batch, returning the
    /// post-increment value. Adapters that can batch should override this;
    /// the default issues the two calls back to back.
    async fn incr_and_expire(&self, key: &str, ttl_seconds: u64) -> Result<i64> {
        let count = self.incr(key).await?;
        self.expire(key, ttl_seconds).await?;
        Ok(count)
    }
}

/// Cache key construction. The formats are part of the external contract
/// and must stay byte-stable across versions.
pub mod keys {
    use uuid::Uuid;

    pub const CATEGORIES: &str = "cache:categories";

    pub fn post(post_id: Uuid) -> String {
        format!("cache:post:{}", post_id)
    }

    fn category_segment(category_id: Option<Uuid>) -> String {
        match category_id {
            Some(id) => id.to_string(),
            None => "all".to_string(),
        }
    }

    pub fn feed_page(category_id: Option<Uuid>, fresh: bool, page: u32, limit: u32) -> String {
        format!(
            "cache:feed:cat:{}:fresh:{}:page:{}:limit:{}",
            category_segment(category_id),
            if fresh { 1 } else { 0 },
            page,
            limit
        )
    }

    /// Pattern covering every feed page cached for a category (or for the
    /// aggregated "all" view when `category_id` is `None`).
    pub fn feed_pattern(category_id: Option<Uuid>) -> String {
        format!("cache:feed:cat:{}:*", category_segment(category_id))
    }

}
