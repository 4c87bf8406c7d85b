//! Repository Layer
//!
//! Data access for category records: the abstract protocol, the caching
//! decorator the screen talks to, and the empty-list fallback for loads.

mod traits;
mod cached;


pub use traits::{CategoryRepository, MAX_PAGES};
pub use cached::CachedRepository;

use crate::models::CategoryRecord;

/// List every category, or nothing if the backend cannot be reached.
///
/// A failed load renders the empty state rather than an error page.
pub async fn load_categories<R: CategoryRepository + ?Sized>(repo: &R, page_size: u32) -> Vec<CategoryRecord> {
    match repo.list(page_size).await {
        Ok(records) => {
            log::debug!("[REPO] Loaded {} categories", records.len());
            records
        }
        Err(err) => {
            log::warn!("[REPO] Category list failed, showing empty state: {}", err);
            Vec::new()
        }
    }
}
