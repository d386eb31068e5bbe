/// Category service - cached listing of the read-mostly category set
use std::sync::Arc;

use crate::cache::{keys, ContentCache};
use crate::db::PersistentStore;
use crate::error::Result;
use crate::models::Category;

pub struct CategoryService {
    store: Arc<dyn PersistentStore>,
    cache: Arc<ContentCache>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn PersistentStore>, cache: Arc<ContentCache>) -> Self {
        Self { store, cache }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        if let Some(cached) = self.cache.get_json::<Vec<Category>>(keys::CATEGORIES).await {
            return Ok(cached);
        }

        let categories = self.store.list_categories().await?;

        if let Err(err) = self
            .cache
            .put_json(
                keys::CATEGORIES,
                &categories,
                self.cache.categories_ttl_secs(),
            )
            .await
        {
            tracing::debug!("category list cache set failed: {}", err);
        }

        Ok(categories)
    }
}
