/// Data models for the tea-feed service
///
/// Wire shapes serialize in camelCase to match the public API contract.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post in a category. `like_count` is a denormalized counter maintained
/// by paired atomic adjustments alongside the likes table, never the
/// authority on whether a given user's like exists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with a unique name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// A (user, post) like relation. At most one row per pair; this uniqueness
/// is the idempotency anchor for like/dislike toggling.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub user_id: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A feed entry: the post plus its popularity score. The score is present
/// on every item for API uniformity; it only drives ordering when
/// freshness ranking was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub post: Post,
    pub score: f64,
}

/// One page of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub items: Vec<FeedItem>,
}

/// Outcome of a like request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub ok: bool,
    pub liked: bool,
}

/// Outcome of a dislike request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DislikeResponse {
    pub ok: bool,
    pub disliked: bool,
}
