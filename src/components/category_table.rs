//! Category Table Component
//!
//! Renders the filtered forest as a collapsible table.

use leptos::prelude::*;

use crate::components::CategoryRow;
use crate::context::use_app_context;
use crate::store::{store_is_loaded, use_catalog_store};
use crate::tree::Forest;

/// Category table with expandable root rows
#[component]
pub fn CategoryTable(forest: Memo<Forest>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();
    let page = ctx.page;

    let rows = move || forest.with(|forest| page.with(|p| p.rows(forest)));
    let loading = move || !store_is_loaded(&store);
    let no_categories = move || store_is_loaded(&store) && forest.with(|f| f.is_empty());
    let no_matches = move || !forest.with(|f| f.is_empty()) && rows().is_empty();

    view! {
        <div class="category-table-wrapper">
            <Show when=loading>
                <div class="loading-placeholder">"Loading categories..."</div>
            </Show>

            <Show when=no_categories>
                <div class="empty-state">"No categories found"</div>
            </Show>

            <Show when=no_matches>
                <div class="empty-state">
                    {move || format!("No categories match \"{}\"", page.with(|p| p.query.trim().to_string()))}
                </div>
            </Show>

            <table class="category-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Slug"</th>
                        <th>"Order"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|row| {
                            // Every rendered field, so edits re-render the row
                            (
                                row.category.id.clone(),
                                row.depth,
                                row.expanded,
                                row.child_count,
                                row.category.name.clone(),
                                row.category.slug.clone(),
                                row.category.sort_order.to_bits(),
                                row.category.is_active,
                            )
                        }
                        children=move |row| view! { <CategoryRow row=row forest=forest /> }
                    />
                </tbody>
            </table>
        </div>
    }
}
