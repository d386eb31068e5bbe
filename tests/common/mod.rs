#![allow(dead_code)]
//! In-memory fakes for the store capabilities, shared by integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use tea_feed::cache::CounterStore;
use tea_feed::db::{FeedPage, PersistentStore};
use tea_feed::error::{AppError, Result};
use tea_feed::models::{Category, Post};

// =====================================================================
// Persistent store fake
// =====================================================================

#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
    likes: Mutex<HashSet<(String, Uuid)>>,
    categories: Mutex<Vec<Category>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.categories.lock().unwrap().push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Insert a post with explicit like count and creation time, for
    /// ranking and pagination scenarios.
    pub fn seed_post(
        &self,
        category_id: Uuid,
        title: &str,
        like_count: i64,
        created_at: DateTime<Utc>,
    ) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: "seed".to_string(),
            category_id,
            title: title.to_string(),
            content: "content".to_string(),
            like_count,
            created_at,
            updated_at: created_at,
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn like_count(&self, post_id: Uuid) -> i64 {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.like_count)
            .unwrap_or(-1)
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn category_exists(&self, category_id: Uuid) -> Result<bool> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == category_id))
    }

    async fn create_post(
        &self,
        author_id: &str,
        category_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id: author_id.to_string(),
            category_id,
            title: title.to_string(),
            content: content.to_string(),
            like_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post_id)
            .cloned())
    }

    async fn find_feed_page(
        &self,
        category_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<FeedPage> {
        let posts = self.posts.lock().unwrap();
        let mut matching: Vec<Post> = posts
            .iter()
            .filter(|p| category_id.map_or(true, |c| p.category_id == c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.like_count
                .cmp(&a.like_count)
                .then(b.created_at.cmp(&a.created_at))
        });

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok(FeedPage { items, total })
    }

    async fn insert_like_if_absent(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .insert((user_id.to_string(), post_id)))
    }

    async fn delete_like_if_present(&self, user_id: &str, post_id: Uuid) -> Result<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .remove(&(user_id.to_string(), post_id)))
    }

    async fn increment_like_count(&self, post_id: Uuid, delta: i64) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
            post.like_count += delta;
            post.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

// =====================================================================
// Counter store fake
// =====================================================================

/// Key/value + counter store. TTLs are accepted and recorded but never
/// expire during a test; `set_failing` makes every operation report the
/// store as unreachable.
#[derive(Default)]
pub struct MemoryCounterStore {
    data: Mutex<HashMap<String, String>>,
    ttls: Mutex<HashMap<String, u64>>,
    failing: AtomicBool,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().unwrap().contains_key(key)
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::DependencyUnavailable(
                "counter store offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        self.check_available()?;
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.ttls.lock().unwrap().insert(key.to_string(), ttl_seconds);
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<()> {
        self.check_available()?;
        let mut data = self.data.lock().unwrap();
        for key in keys {
            data.remove(key);
        }
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.check_available()?;
        let mut data = self.data.lock().unwrap();
        let count = data
            .get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;
        data.insert(key.to_string(), count.to_string());
        Ok(count)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<()> {
        self.check_available()?;
        self.ttls.lock().unwrap().insert(key.to_string(), ttl_seconds);
        Ok(())
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        self.check_available()?;
        let data = self.data.lock().unwrap();
        let keys = match pattern.strip_suffix('*') {
            Some(prefix) => data
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect(),
            None => data.keys().filter(|k| *k == pattern).cloned().collect(),
        };
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
