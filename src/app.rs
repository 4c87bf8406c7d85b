//! Catalog Admin App
//!
//! Category management screen: toolbar, collapsible table and dialogs.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::HttpCategoryRepository;
use crate::components::{CategoryFormDialog, CategoryTable, CategoryToolbar, DeleteCategoryDialog, NoticeTray};
use crate::config::ApiConfig;
use crate::context::{AppContext, SharedRepository};
use crate::controller::CategoryPageState;
use crate::repository::{load_categories, CachedRepository};
use crate::store::{store_forest, store_set_categories, CatalogState};

/// Build-time configuration resolved against the page origin
fn api_config() -> ApiConfig {
    let config = ApiConfig::from_build_env();
    match web_sys::window().and_then(|window| window.location().origin().ok()) {
        Some(origin) => config.with_origin(&origin),
        None => config,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = api_config();
    let page_size = config.page_size;
    log::info!("[APP] Catalog API at {}", config.base_url);

    let repository: SharedRepository = Arc::new(CachedRepository::new(HttpCategoryRepository::new(config)));

    // State
    let store = Store::new(CatalogState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let page = RwSignal::new(CategoryPageState::new());

    // Provide context to all children
    provide_context(store);
    let ctx = AppContext::new(set_reload_trigger, page, repository, page_size);
    provide_context(ctx);

    // Responses from loads that were superseded by a newer one are dropped
    let latest_load = StoredValue::new(0u32);

    // Load categories on mount and after every successful write
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let load = latest_load.get_value() + 1;
        latest_load.set_value(load);
        let repository = ctx.repository();
        log::debug!("[APP] Loading categories, trigger={}", trigger);
        spawn_local(async move {
            let records = load_categories(&*repository, ctx.page_size).await;
            if latest_load.get_value() == load {
                log::debug!("[APP] Loaded {} categories", records.len());
                store_set_categories(&store, records);
            } else {
                log::debug!("[APP] Dropping superseded load #{}", load);
            }
        });
    });

    let forest = Memo::new(move |_| store_forest(&store));

    view! {
        <div class="catalog-layout">
            <main class="main-content">
                <h1>"Categories"</h1>

                <CategoryToolbar forest=forest />

                <CategoryTable forest=forest />
            </main>

            <CategoryFormDialog forest=forest />
            <DeleteCategoryDialog />
            <NoticeTray />
        </div>
    }
}
