//! Notice Tray Component
//!
//! Transient notifications; each one dismisses itself after a timeout.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::notify::{Notice, NOTICE_TIMEOUT_MS};

#[component]
pub fn NoticeTray() -> impl IntoView {
    let ctx = use_app_context();
    let page = ctx.page;

    let notices = move || page.with(|p| p.notices.items().to_vec());

    view! {
        <div class="notice-tray">
            <For
                each=notices
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    Timeout::new(NOTICE_TIMEOUT_MS, move || {
                        page.update(|p| p.notices.dismiss(id));
                    })
                    .forget();

                    view! {
                        <div class=notice.level.css_class()>
                            <span class="notice-message">{notice.message}</span>
                            <button
                                class="notice-dismiss"
                                on:click=move |_| page.update(|p| p.notices.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
