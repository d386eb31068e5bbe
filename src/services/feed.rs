/// Feed assembler
///
/// Orchestrates the read-through feed cache, the store query, per-item
/// scoring and the optional freshness re-rank. The store always returns
/// the fixed (like_count DESC, created_at DESC) order so the query stays
/// index-covered; freshness ranking re-sorts the page in memory.
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cache::{keys, ContentCache};
use crate::db::PersistentStore;
use crate::error::Result;
use crate::models::{FeedItem, FeedResponse};
use crate::services::score::{score, DECAY_DISABLED_HALF_LIFE_HOURS};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Already-validated feed query. Out-of-range pagination is clamped, never
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct FeedParams {
    pub category_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub fresh: bool,
}

pub struct FeedService {
    store: Arc<dyn PersistentStore>,
    cache: Arc<ContentCache>,
    half_life_hours: f64,
}

impl FeedService {
    pub fn new(
        store: Arc<dyn PersistentStore>,
        cache: Arc<ContentCache>,
        half_life_hours: f64,
    ) -> Self {
        Self {
            store,
            cache,
            half_life_hours,
        }
    }

    pub async fn feed(&self, params: FeedParams) -> Result<FeedResponse> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);

        let cache_key = keys::feed_page(params.category_id, params.fresh, page, limit);
        if let Some(cached) = self.cache.get_json::<FeedResponse>(&cache_key).await {
            return Ok(cached);
        }

        let skip = i64::from(page - 1) * i64::from(limit);
        let feed_page = self
            .store
            .find_feed_page(params.category_id, skip, i64::from(limit))
            .await?;

        let half_life = if params.fresh {
            self.half_life_hours
        } else {
            DECAY_DISABLED_HALF_LIFE_HOURS
        };
        let now = Utc::now();

        let mut items: Vec<FeedItem> = feed_page
            .items
            .into_iter()
            .map(|post| {
                let item_score = score(post.like_count, post.created_at, now, half_life);
                FeedItem {
                    post,
                    score: item_score,
                }
            })
            .collect();

        if params.fresh {
            // Stable sort: ties keep the store's popularity order.
            items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        }

        let response = FeedResponse {
            page,
            limit,
            total: feed_page.total,
            items,
        };

        // A failed feed-page write only means the next read recomputes.
        if let Err(err) = self
            .cache
            .put_json(&cache_key, &response, self.cache.feed_ttl_secs())
            .await
        {
            warn!(%cache_key, "feed cache write failed: {}", err);
        }

        Ok(response)
    }
}
