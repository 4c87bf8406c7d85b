//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::HttpCategoryRepository;
use crate::controller::CategoryPageState;
use crate::error::CatalogResult;
use crate::repository::CachedRepository;

/// Repository every component talks to
pub type SharedRepository = Arc<CachedRepository<HttpCategoryRepository>>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload categories from backend
    set_reload_trigger: WriteSignal<u32>,
    /// Query, expansion, dialogs and notices of the category screen
    pub page: RwSignal<CategoryPageState>,
    repository: StoredValue<SharedRepository>,
    /// Page size used when listing
    pub page_size: u32,
}

impl AppContext {
    pub fn new(
        set_reload_trigger: WriteSignal<u32>,
        page: RwSignal<CategoryPageState>,
        repository: SharedRepository,
        page_size: u32,
    ) -> Self {
        Self {
            set_reload_trigger,
            page,
            repository: StoredValue::new(repository),
            page_size,
        }
    }

    /// Trigger a reload of categories
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn repository(&self) -> SharedRepository {
        self.repository.get_value()
    }

    /// Send a request that was already validated by the page state, then
    /// settle the page with its outcome. Successful writes reload the list.
    pub fn spawn_mutation<F, Fut>(&self, request: F)
    where
        F: FnOnce(SharedRepository) -> Fut + 'static,
        Fut: Future<Output = CatalogResult<()>> + 'static,
    {
        let ctx = *self;
        let repository = self.repository();
        spawn_local(async move {
            let outcome = request(repository).await;
            ctx.page.update(|page| page.settle(outcome.as_ref().map(|_| ())));
            if outcome.is_ok() {
                ctx.reload();
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
