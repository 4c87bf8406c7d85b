//! Category Toolbar Component
//!
//! Search box, expand/collapse controls and the "new category" button.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::tree::Forest;

#[component]
pub fn CategoryToolbar(forest: Memo<Forest>) -> impl IntoView {
    let ctx = use_app_context();
    let page = ctx.page;

    let summary = move || {
        forest.with(|forest| {
            let roots = forest.trees.len();
            let children = forest.category_count() - roots;
            format!("{} categories, {} subcategories", roots, children)
        })
    };

    view! {
        <div class="category-toolbar">
            <input
                type="search"
                class="category-search"
                placeholder="Search by name or slug..."
                prop:value=move || page.with(|p| p.query.clone())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    page.update(|p| p.set_query(query));
                }
            />

            <button
                type="button"
                class="toolbar-btn"
                on:click=move |_| forest.with_untracked(|forest| page.update(|p| p.expand_all(forest)))
            >
                "Expand all"
            </button>
            <button
                type="button"
                class="toolbar-btn"
                on:click=move |_| page.update(|p| p.collapse_all())
            >
                "Collapse all"
            </button>

            <span class="category-summary">{summary}</span>

            <button
                type="button"
                class="toolbar-btn primary"
                disabled=move || page.with(|p| p.is_pending())
                on:click=move |_| {
                    page.update(|p| {
                        p.open_create(None);
                    });
                }
            >
                "+ New category"
            </button>
        </div>
    }
}
