//! Applications received for one job

use careersync_common::format::{capitalize, format_date};
use careersync_common::{Application, Candidate};
use leptos::prelude::*;

use crate::components::modal_frame::ModalFrame;
use crate::components::progress_circle::ProgressCircle;
use crate::state::AppContext;

#[component]
pub fn ApplicationsModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let panel = ctx.applications;

    let open = Signal::derive(move || panel.with(|p| p.is_open()));
    let title = Signal::derive(move || panel.with(|p| p.title()));
    let rows = move || panel.with(|p| p.visible().into_iter().cloned().collect::<Vec<_>>());

    view! {
        <ModalFrame open=open title=title on_close=move |_| panel.update(|p| p.close()) class="applications-modal">
            <div class="applications-stats">
                <span class="stat">{move || panel.with(|p| p.total_label())}</span>
                <span class="stat stat-active">{move || panel.with(|p| p.active_label())}</span>
            </div>
            <div class="table-filters">
                <input
                    type="search"
                    placeholder="Search applicants..."
                    prop:value=move || panel.with(|p| p.filter.query.clone())
                    on:input=move |ev| panel.update(|p| p.filter.query = event_target_value(&ev))
                />
                <select
                    prop:value=move || panel.with(|p| p.filter.status.clone())
                    on:change=move |ev| panel.update(|p| p.filter.status = event_target_value(&ev))
                >
                    <option value="all">"All Status"</option>
                    <option value="pending">"Pending"</option>
                    <option value="reviewed">"Reviewed"</option>
                    <option value="shortlisted">"Shortlisted"</option>
                    <option value="rejected">"Rejected"</option>
                    <option value="hired">"Hired"</option>
                </select>
            </div>
            {move || panel.with(|p| p.placeholder()).map(|text| view! {
                <div class="applications-placeholder">{text}</div>
            })}
            <div class="applications-list">
                <For
                    each=rows
                    key=|app| (app.id, app.status)
                    children=move |app| application_row(ctx, app)
                />
            </div>
        </ModalFrame>
    }
}

fn application_row(ctx: AppContext, app: Application) -> impl IntoView {
    let candidate_id = app.candidate_id.unwrap_or(app.candidate.id);
    let status_class = format!("status-badge status-{}", app.status.as_str());
    let score = app.match_score.map(|score| {
        let percent = score.min(100) as u8;
        view! { <ProgressCircle percent=percent /> }
    });

    view! {
        <div class="application-row">
            <div class="candidate-avatar">{app.candidate.initials()}</div>
            <div class="application-info">
                <div class="candidate-name">{app.candidate.name.clone()}</div>
                <div class="text-muted">{app.candidate.email.clone()}</div>
                <div class="text-muted">
                    "Applied " {format_date(app.applied_at.as_deref().unwrap_or_default())}
                </div>
            </div>
            {score}
            <span class=status_class>{capitalize(app.status.as_str())}</span>
            <button class="btn btn-small" on:click={move |_| ctx.open_entity::<Candidate>(candidate_id)}>
                "View Profile"
            </button>
        </div>
    }
}
