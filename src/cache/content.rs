/// Read-through cache layer for posts, feed pages and the category list
///
/// Read-path faults (store errors, undecodable payloads) degrade to a miss
/// so that cache trouble can never take reads down; the worst case is a
/// recompute against the source of truth. Write faults are returned to the
/// caller, which decides whether they matter for its freshness guarantees.
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{keys, CounterStore};
use crate::error::Result;
use std::sync::Arc;

pub struct ContentCache {
    store: Arc<dyn CounterStore>,
    post_ttl_secs: u64,
    feed_ttl_secs: u64,
    categories_ttl_secs: u64,
}

impl ContentCache {
    pub fn new(
        store: Arc<dyn CounterStore>,
        post_ttl_secs: u64,
        feed_ttl_secs: u64,
        categories_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            post_ttl_secs,
            feed_ttl_secs,
            categories_ttl_secs,
        }
    }

    pub fn post_ttl_secs(&self) -> u64 {
        self.post_ttl_secs
    }

    pub fn feed_ttl_secs(&self) -> u64 {
        self.feed_ttl_secs
    }

    pub fn categories_ttl_secs(&self) -> u64 {
        self.categories_ttl_secs
    }

    /// Fetch and deserialize a cached value. Any fault is a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(data)) => match serde_json::from_str::<T>(&data) {
                Ok(value) => {
                    debug!(%key, "cache HIT");
                    Some(value)
                }
                Err(e) => {
                    warn!(%key, "cache entry undecodable, treating as miss: {}", e);
                    None
                }
            },
            Ok(None) => {
                debug!(%key, "cache MISS");
                None
            }
            Err(e) => {
                warn!(%key, "cache read failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Serialize and store a value with the given TTL.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) -> Result<()> {
        let data = serde_json::to_string(value)?;
        self.store.set(key, &data, ttl_seconds).await?;
        debug!(%key, ttl_seconds, "cache WRITE");
        Ok(())
    }

    /// Invalidation required after any like/dislike mutation: the single
    /// post entry, every feed page for the post's category, and every feed
    /// page of the aggregated "all" view (an "all" page can contain posts
    /// from any category).
    pub async fn invalidate_after_post_mutation(
        &self,
        post_id: Uuid,
        category_id: Uuid,
    ) -> Result<()> {
        let mut keys_to_delete = vec![keys::post(post_id)];

        for pattern in [keys::feed_pattern(Some(category_id)), keys::feed_pattern(None)] {
            let matched = self.store.keys_matching(&pattern).await?;
            keys_to_delete.extend(matched);
        }

        debug!(
            %post_id,
            %category_id,
            count = keys_to_delete.len(),
            "invalidating cache entries after mutation"
        );
        self.store.del(&keys_to_delete).await
    }
}
