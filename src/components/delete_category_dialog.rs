//! Delete Category Dialog
//!
//! Confirmation with confirm/cancel actions. Deleting a root that still has
//! subcategories is allowed; the dialog only warns.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::repository::CategoryRepository;

#[component]
pub fn DeleteCategoryDialog() -> impl IntoView {
    let ctx = use_app_context();
    let page = ctx.page;

    let is_open = move || page.with(|p| p.delete_target.is_some());
    let busy = move || page.with(|p| p.is_pending());
    let name = move || page.with(|p| p.delete_target.as_ref().map(|t| t.name.clone()).unwrap_or_default());
    let warning = move || page.with(|p| p.delete_target.as_ref().and_then(|t| t.warning()));

    let on_confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        match page.try_update(|p| p.submit_delete()) {
            Some(Ok(id)) => {
                ctx.spawn_mutation(move |repo| async move { repo.delete(&id).await });
            }
            Some(Err(err)) => log::debug!("[DELETE] Not submitted: {}", err),
            None => {}
        }
    };

    view! {
        <Show when=is_open>
            <div class="dialog-backdrop">
                <div class="dialog delete-confirm">
                    <h2>"Delete category?"</h2>
                    <p class="delete-confirm-text">
                        {move || format!("\"{}\" will be removed.", name())}
                    </p>
                    {move || warning().map(|text| view! { <p class="delete-warning">{text}</p> })}
                    <div class="dialog-actions">
                        <button
                            class="cancel-btn"
                            disabled=busy
                            on:click=move |ev| {
                                ev.stop_propagation();
                                page.update(|p| {
                                    p.close_dialog();
                                });
                            }
                        >
                            "✗ Cancel"
                        </button>
                        <button class="confirm-btn danger" disabled=busy on:click=on_confirm>
                            {move || if busy() { "Deleting..." } else { "✓ Delete" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
