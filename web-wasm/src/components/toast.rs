//! The single toast in the corner of every page

use leptos::prelude::*;

use crate::state::AppContext;

#[component]
pub fn Toast() -> impl IntoView {
    let toast = expect_context::<AppContext>().toast;

    let class = move || {
        toast.with(|t| {
            let mut classes = vec!["notification", t.kind().as_str()];
            if t.is_visible() {
                classes.push("show");
            }
            classes.join(" ")
        })
    };

    view! {
        <div class=class role="status">
            <span class="notification-icon">{move || toast.with(|t| t.kind().icon())}</span>
            <span class="notification-message">{move || toast.with(|t| t.message().to_string())}</span>
            <button class="notification-close" on:click=move |_| toast.update(|t| t.dismiss())>
                "×"
            </button>
        </div>
    }
}
