//! Repository Layer - Core Traits
//!
//! The category resource as seen from the screen. Implementations talk to
//! the REST backend or, in tests, keep records in memory.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{CategoryId, CategoryPatch, CategoryRecord, NewCategory, Page};

/// Upper bound on pages walked by [`CategoryRepository::list`]
pub const MAX_PAGES: u32 = 200;

/// CRUD protocol for categories.
///
/// Futures are not `Send`: in the browser every request runs on the single
/// UI thread.
#[async_trait(?Send)]
pub trait CategoryRepository {
    /// `GET /categories?page=&size=` (pages start at 1)
    async fn list_page(&self, page: u32, size: u32) -> CatalogResult<Page<CategoryRecord>>;

    /// `POST /categories`
    ///
    /// Any success status completes the write; the stored record is returned
    /// only when the body carries one.
    async fn create(&self, body: &NewCategory) -> CatalogResult<Option<CategoryRecord>>;

    /// `PATCH /categories/{id}`, same contract as [`CategoryRepository::create`]
    async fn update(&self, id: &CategoryId, patch: &CategoryPatch) -> CatalogResult<Option<CategoryRecord>>;

    /// `DELETE /categories/{id}`
    async fn delete(&self, id: &CategoryId) -> CatalogResult<()>;

    /// Every category of the tenant, walking pages until exhausted
    async fn list(&self, size: u32) -> CatalogResult<Vec<CategoryRecord>> {
        let size = size.max(1);
        let mut records = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch = self.list_page(page, size).await?;
            let received = batch.items.len();
            records.extend(batch.items);

            let done = if received == 0 {
                true
            } else if let Some(total) = batch.total {
                records.len() as u64 >= total
            } else if let Some(pages) = batch.pages {
                page >= pages
            } else {
                // Server may cap the size it was asked for
                (received as u32) < batch.size.unwrap_or(size)
            };
            if done {
                return Ok(records);
            }
        }

        log::warn!("[REPO] Stopped listing after {} pages ({} categories)", MAX_PAGES, records.len());
        Ok(records)
    }
}
