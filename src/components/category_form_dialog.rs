//! Category Form Dialog
//!
//! Create/edit dialog. Field edits go straight into the page state; submit
//! validates there before anything is sent.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::controller::CategoryPageState;
use crate::models::{CategoryId, CategoryPatch, NewCategory};
use crate::repository::CategoryRepository;
use crate::tree::Forest;
use crate::validation::CategoryForm;

/// Validated request ready to send
enum Submission {
    Create(NewCategory),
    Update(CategoryId, CategoryPatch),
}

/// Reader for one text field of the open form
fn form_value(
    page: RwSignal<CategoryPageState>,
    read: fn(&CategoryForm) -> String,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || page.with(|p| p.active_form().map(read).unwrap_or_default())
}

#[component]
pub fn CategoryFormDialog(forest: Memo<Forest>) -> impl IntoView {
    let ctx = use_app_context();
    let page = ctx.page;

    let is_open = move || page.with(|p| p.active_form().is_some());
    let busy = move || page.with(|p| p.is_pending());

    let title = move || {
        page.with(|p| match (&p.create_form, &p.edit_form) {
            (Some(form), _) if form.parent_id.is_some() => "New subcategory",
            (Some(_), _) => "New category",
            _ => "Edit category",
        })
    };

    let name = form_value(page, |f| f.name.clone());
    let slug = form_value(page, |f| f.slug.clone());
    let description = form_value(page, |f| f.description.clone());
    let sort_order = form_value(page, |f| f.sort_order.clone());
    let parent = form_value(page, |f| f.parent_id.as_ref().map(|id| id.to_string()).unwrap_or_default());
    let is_active = move || page.with(|p| p.active_form().map_or(true, |f| f.is_active));

    // Roots the category may be placed under (never itself)
    let parent_options = move || {
        let editing = page.with(|p| p.edit_form.as_ref().map(|e| e.original.id.clone()));
        forest.with(|forest| {
            forest
                .trees
                .iter()
                .filter(|tree| Some(&tree.root.id) != editing.as_ref())
                .map(|tree| (tree.root.id.to_string(), tree.root.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submission = forest.with_untracked(|forest| {
            page.try_update(|p| {
                if p.create_form.is_some() {
                    p.submit_create(forest).map(Submission::Create)
                } else {
                    p.submit_edit(forest).map(|(id, patch)| Submission::Update(id, patch))
                }
            })
        });

        match submission {
            Some(Ok(Submission::Create(body))) => {
                ctx.spawn_mutation(move |repo| async move { repo.create(&body).await.map(|_| ()) });
            }
            Some(Ok(Submission::Update(id, patch))) => {
                ctx.spawn_mutation(move |repo| async move { repo.update(&id, &patch).await.map(|_| ()) });
            }
            Some(Err(err)) => log::debug!("[FORM] Not submitted: {}", err),
            None => {}
        }
    };

    view! {
        <Show when=is_open>
            <div class="dialog-backdrop">
                <form class="dialog category-form" on:submit=on_submit>
                    <h2>{title}</h2>

                    <label>
                        "Name"
                        <input
                            type="text"
                            prop:value=name
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                page.update(|p| p.edit_fields(|f| f.name = value));
                            }
                        />
                    </label>

                    <label>
                        "Slug"
                        <input
                            type="text"
                            placeholder="Generated from the name when empty"
                            prop:value=slug
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                page.update(|p| p.edit_fields(|f| f.slug = value));
                            }
                        />
                    </label>

                    <label>
                        "Description"
                        <textarea
                            prop:value=description
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                page.update(|p| p.edit_fields(|f| f.description = value));
                            }
                        ></textarea>
                    </label>

                    <label>
                        "Parent"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            let parent_id = (!value.is_empty()).then(|| CategoryId::new(value));
                            page.update(|p| p.edit_fields(|f| f.parent_id = parent_id));
                        }>
                            <option value="" selected=move || parent().is_empty()>"None (top level)"</option>
                            <For
                                each=parent_options
                                key=|option| option.clone()
                                children=move |(id, label)| {
                                    let option_id = id.clone();
                                    view! {
                                        <option value=id selected=move || parent() == option_id>{label}</option>
                                    }
                                }
                            />
                        </select>
                    </label>

                    <label>
                        "Sort order"
                        <input
                            type="text"
                            inputmode="numeric"
                            prop:value=sort_order
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                page.update(|p| p.edit_fields(|f| f.sort_order = value));
                            }
                        />
                    </label>

                    <label class="checkbox-label">
                        <input
                            type="checkbox"
                            prop:checked=is_active
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                page.update(|p| p.edit_fields(|f| f.is_active = checked));
                            }
                        />
                        "Active"
                    </label>

                    <div class="dialog-actions">
                        <button
                            type="button"
                            class="cancel-btn"
                            disabled=busy
                            on:click=move |_| {
                                page.update(|p| {
                                    p.close_dialog();
                                });
                            }
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="confirm-btn" disabled=busy>
                            {move || if busy() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
