/// Postgres adapter for `PersistentStore`
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{FeedPage, PersistentStore};
use crate::error::Result;
use crate::models::{Category, Post};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistentStore for PgStore {
    async fn category_exists(&self, category_id: Uuid) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn create_post(
        &self,
        author_id: &str,
        category_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, category_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, category_id, title, content, like_count,
                      created_at, updated_at
            "#,
        )
        .bind(author_id)
        .bind(category_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, category_id, title, content, like_count,
                   created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_feed_page(
        &self,
        category_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<FeedPage> {
        let items = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, category_id, title, content, like_count,
                   created_at, updated_at
            FROM posts
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY like_count DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM posts WHERE ($1::uuid IS NULL OR category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(FeedPage {
            items,
            total: total.0,
        })
    }

    async fn insert_like_if_absent(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_like_if_present(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_like_count(&self, post_id: Uuid, delta: i64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE posts
            SET like_count = like_count + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
