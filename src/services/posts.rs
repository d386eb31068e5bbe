/// Post service - creation, retrieval, and like/dislike toggling
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cache::{keys, ContentCache};
use crate::db::PersistentStore;
use crate::error::{AppError, Result};
use crate::models::Post;

pub struct PostService {
    store: Arc<dyn PersistentStore>,
    cache: Arc<ContentCache>,
}

impl PostService {
    pub fn new(store: Arc<dyn PersistentStore>, cache: Arc<ContentCache>) -> Self {
        Self { store, cache }
    }

    /// Create a post after confirming the category exists.
    pub async fn create_post(
        &self,
        author_id: &str,
        category_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        if !self.store.category_exists(category_id).await? {
            return Err(AppError::Validation("invalid categoryId".to_string()));
        }

        self.store
            .create_post(author_id, category_id, title, content)
            .await
    }

    /// Get a post by ID, read-through cached.
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let key = keys::post(post_id);
        if let Some(cached) = self.cache.get_json::<Post>(&key).await {
            return Ok(Some(cached));
        }

        let post = self.store.find_post_by_id(post_id).await?;

        if let Some(post) = &post {
            if let Err(err) = self
                .cache
                .put_json(&key, post, self.cache.post_ttl_secs())
                .await
            {
                tracing::debug!(%post_id, "post cache set failed: {}", err);
            }
        }

        Ok(post)
    }

    /// Like a post. Idempotent per (user, post): the first call creates the
    /// like row and bumps the counter, repeats report `liked: false`.
    ///
    /// Ordering is strict: like row, then counter, then invalidation. A
    /// reader between the first two steps sees a transiently low counter,
    /// never a wrong like row.
    pub async fn like(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        let post = self
            .store
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let inserted = self.store.insert_like_if_absent(user_id, post_id).await?;
        if inserted {
            self.store.increment_like_count(post_id, 1).await?;
        }

        // Invalidate even on a no-op like: cheap, and keeps the path uniform.
        if let Err(err) = self
            .cache
            .invalidate_after_post_mutation(post_id, post.category_id)
            .await
        {
            warn!(%post_id, "cache invalidation after like failed: {}", err);
        }

        Ok(inserted)
    }

    /// Remove a like. Reports `disliked: false` when no like row existed;
    /// the counter only moves when a row was actually deleted.
    pub async fn dislike(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        let post = self
            .store
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let deleted = self.store.delete_like_if_present(user_id, post_id).await?;
        if deleted {
            self.store.increment_like_count(post_id, -1).await?;
        }

        if let Err(err) = self
            .cache
            .invalidate_after_post_mutation(post_id, post.category_id)
            .await
        {
            warn!(%post_id, "cache invalidation after dislike failed: {}", err);
        }

        Ok(deleted)
    }
}
