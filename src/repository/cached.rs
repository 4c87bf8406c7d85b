//! Caching Repository
//!
//! Serves the category list from memory and drops it on every successful
//! write, so the next read goes back to the backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::CategoryRepository;
use crate::error::CatalogResult;
use crate::models::{CategoryId, CategoryPatch, CategoryRecord, NewCategory, Page};

#[derive(Default)]
struct CacheSlot {
    /// Bumped on every invalidation
    generation: u64,
    records: Option<Vec<CategoryRecord>>,
}

/// Read-through cache in front of another repository.
///
/// A list that started before an invalidation is returned to its caller but
/// never stored.
pub struct CachedRepository<R> {
    inner: R,
    slot: Mutex<CacheSlot>,
}

impl<R> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            slot: Mutex::new(CacheSlot::default()),
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn lock(&self) -> MutexGuard<'_, CacheSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget the cached list
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.records = None;
        log::debug!("[CACHE] Category list invalidated (generation {})", slot.generation);
    }

    #[cfg(test)]
    pub fn is_cached(&self) -> bool {
        self.lock().records.is_some()
    }
}

#[async_trait(?Send)]
impl<R: CategoryRepository> CategoryRepository for CachedRepository<R> {
    async fn list_page(&self, page: u32, size: u32) -> CatalogResult<Page<CategoryRecord>> {
        self.inner.list_page(page, size).await
    }

    async fn create(&self, body: &NewCategory) -> CatalogResult<Option<CategoryRecord>> {
        let created = self.inner.create(body).await?;
        self.invalidate();
        Ok(created)
    }

    async fn update(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<Option<CategoryRecord>> {
        let updated = self.inner.update(id, patch).await?;
        self.invalidate();
        Ok(updated)
    }

    async fn delete(&self, id: &CategoryId) -> CatalogResult<()> {
        self.inner.delete(id).await?;
        self.invalidate();
        Ok(())
    }

    async fn list(&self, size: u32) -> CatalogResult<Vec<CategoryRecord>> {
        let generation = {
            let slot = self.lock();
            if let Some(records) = &slot.records {
                log::debug!("[CACHE] Serving {} categories from cache", records.len());
                return Ok(records.clone());
            }
            slot.generation
        };

        let records = self.inner.list(size).await?;

        let mut slot = self.lock();
        if slot.generation == generation {
            slot.records = Some(records.clone());
        } else {
            log::debug!("[CACHE] Discarding list fetched before invalidation");
        }
        Ok(records)
    }
}
