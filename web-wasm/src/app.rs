//! Root component: context, global shortcuts and per-page layout

use careersync_common::{ClientConfig, Page, PageData, Shortcut};
use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::bootstrap::paint_progress_circles;
use crate::components::{
    applications_modal::ApplicationsModal,
    apply_modal::ApplyModal,
    candidate_list::CandidateList,
    candidate_modal::CandidateModal,
    confirm_dialog::ConfirmDialog,
    header::Header,
    job_details_modal::JobDetailsModal,
    job_modal::JobModal,
    job_search::JobSearch,
    job_table::JobTable,
    post_job_modal::PostJobModal,
    toast::Toast,
};
use crate::state::AppContext;

fn install_shortcuts(ctx: AppContext) {
    let Some(window) = web_sys::window() else { return };
    EventListener::new(&window, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else { return };
        let ctrl = event.ctrl_key() || event.meta_key();
        let Some(shortcut) = Shortcut::from_key(&event.key(), ctrl) else { return };
        if ctx.handle_shortcut(shortcut) && shortcut.prevents_default() {
            event.prevent_default();
        }
    })
    .forget();
}

#[component]
pub fn App(config: ClientConfig, page: PageData) -> impl IntoView {
    let ctx = AppContext::new(config, page);
    provide_context(ctx);
    install_shortcuts(ctx);
    paint_progress_circles();

    let body = match ctx.page {
        Page::Dashboard => view! {
            <Header />
            <JobTable />
            <JobModal />
            <CandidateModal />
            <ApplicationsModal />
            <PostJobModal />
        }
        .into_any(),
        Page::Jobs => view! {
            <JobSearch />
            <JobDetailsModal />
            <ApplyModal />
        }
        .into_any(),
        Page::Candidates => view! {
            <CandidateList />
            <CandidateModal />
        }
        .into_any(),
        Page::Analytics | Page::Other => ().into_any(),
    };

    view! {
        <div class="careersync-app">
            {body}
            <ConfirmDialog />
            <Toast />
        </div>
    }
}
