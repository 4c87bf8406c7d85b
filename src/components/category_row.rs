//! Category Row Component
//!
//! One root or child row of the category table.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_find_category, use_catalog_store};
use crate::tree::{Forest, TreeRow};

/// A single category row
#[component]
pub fn CategoryRow(row: TreeRow, forest: Memo<Forest>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();
    let page = ctx.page;

    let category = row.category;
    let is_root = category.is_root();
    let indent = row.depth * 24;
    let busy = move || page.with(|p| p.is_pending());

    let row_id = category.id.clone();
    let toggle_id = category.id.clone();
    let add_child_id = category.id.clone();
    let edit_id = category.id.clone();
    let delete_id = category.id.clone();

    let base_class = if is_root { "category-row root" } else { "category-row child" };
    let row_class = move || {
        if page.with(|p| p.is_pending_for(&row_id)) {
            format!("{} saving", base_class)
        } else {
            base_class.to_string()
        }
    };
    let status = if category.is_active { "badge active" } else { "badge inactive" };
    let status_label = if category.is_active { "Active" } else { "Hidden" };

    view! {
        <tr class=row_class>
            <td class="category-name" style=format!("padding-left: {}px;", indent + 8)>
                // Expand/collapse toggle
                {if is_root && row.child_count > 0 {
                    view! {
                        <button
                            class="category-expand-btn"
                            on:click=move |_| page.update(|p| p.toggle(&toggle_id))
                        >
                            {if row.expanded { "▼" } else { "▶" }}
                        </button>
                    }.into_any()
                } else {
                    view! { <span class="category-expand-placeholder">"·"</span> }.into_any()
                }}

                <span class="category-name-text">{category.name.clone()}</span>
                {is_root.then(|| view! {
                    <span class="category-child-count">{format!("({})", row.child_count)}</span>
                })}
            </td>
            <td class="category-slug">{category.slug.clone()}</td>
            <td class="category-sort">{category.sort_order}</td>
            <td><span class=status>{status_label}</span></td>
            <td class="category-actions">
                {is_root.then(|| view! {
                    <button
                        class="add-child-btn"
                        title="Add subcategory"
                        disabled=busy
                        on:click=move |_| {
                            page.update(|p| {
                                p.open_create(Some(add_child_id.clone()));
                            });
                        }
                    >
                        "+"
                    </button>
                })}
                <button
                    class="edit-btn"
                    disabled=busy
                    on:click=move |_| {
                        if let Some(record) = store_find_category(&store, &edit_id) {
                            page.update(|p| {
                                p.open_edit(&record);
                            });
                        }
                    }
                >
                    "Edit"
                </button>
                <button
                    class="delete-btn"
                    disabled=busy
                    on:click=move |_| {
                        if let Some(record) = store_find_category(&store, &delete_id) {
                            forest.with_untracked(|forest| page.update(|p| {
                                p.open_delete(&record, forest);
                            }));
                        }
                    }
                >
                    "×"
                </button>
            </td>
        </tr>
    }
}
