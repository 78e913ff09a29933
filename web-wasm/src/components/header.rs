//! Dashboard header

use leptos::prelude::*;

use crate::state::AppContext;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let open_post_job = move |_| ctx.post_job_open.set(true);

    view! {
        <header class="dashboard-header">
            <h1>"CareerSync"</h1>
            <div class="header-actions">
                <span class="shortcut-hint">"Ctrl+N"</span>
                <button class="btn btn-primary" on:click=open_post_job>
                    "+ Post Job"
                </button>
            </div>
        </header>
    }
}
