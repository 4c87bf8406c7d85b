//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{CategoryId, CategoryRecord};
use crate::tree::Forest;

/// Category records as last loaded from the backend
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    /// Flat list for the current tenant
    pub categories: Vec<CategoryRecord>,
    /// False until the first load settles (successfully or not)
    pub loaded: bool,
}

/// Type alias for the store
pub type CatalogStore = Store<CatalogState>;

/// Get the catalog store from context
pub fn use_catalog_store() -> CatalogStore {
    expect_context::<CatalogStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the category list after a load
pub fn store_set_categories(store: &CatalogStore, records: Vec<CategoryRecord>) {
    *store.categories().write() = records;
    *store.loaded().write() = true;
}

pub fn store_is_loaded(store: &CatalogStore) -> bool {
    store.loaded().get()
}

/// Find a record by ID
pub fn store_find_category(store: &CatalogStore, id: &CategoryId) -> Option<CategoryRecord> {
    store.categories().read().iter().find(|record| &record.id == id).cloned()
}

/// Build the forest from the current list (tracks the list)
pub fn store_forest(store: &CatalogStore) -> Forest {
    Forest::from_records(&store.categories().read())
}
