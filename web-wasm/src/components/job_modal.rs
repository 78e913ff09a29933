//! Job preview / edit modal of the HR dashboard

use careersync_common::format::{format_date, or_not_specified};
use careersync_common::{Job, JobStatus, JobType, ModalView};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::modal_frame::{draft_input, draft_textarea, ModalFrame};
use crate::state::AppContext;

#[component]
pub fn JobModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let modal = ctx.job_modal;

    // Memos so typing into the draft does not rebuild the form
    let view_kind = Memo::new(move |_| modal.with(|m| m.view()));
    let snapshot = Memo::new(move |_| modal.with(|m| m.entity().cloned()));

    let open = Signal::derive(move || view_kind.get() != ModalView::Hidden);
    let title = Signal::derive(move || modal.with(|m| m.title()));

    let body = move || match view_kind.get() {
        ModalView::Preview => snapshot.get().map(|job| job_preview(ctx, job)).into_any(),
        ModalView::Edit => job_form(ctx).into_any(),
        ModalView::Hidden => ().into_any(),
    };

    view! {
        <ModalFrame open=open title=title on_close=move |_| modal.update(|m| m.close()) class="job-modal">
            <Show when=move || modal.with(|m| m.is_refreshing())>
                <div class="modal-refreshing">"Refreshing..."</div>
            </Show>
            {body}
        </ModalFrame>
    }
}

fn job_preview(ctx: AppContext, job: Job) -> impl IntoView {
    let modal = ctx.job_modal;
    let id = job.id;
    let status_class = format!("status-badge status-{}", job.status.as_str());
    let posted = format_date(job.created_at.as_deref().unwrap_or_default());
    let requirements = job.requirement_list();

    view! {
        <div class="job-preview">
            <div class="preview-header">
                <h3>{job.title.clone()}</h3>
                <span class=status_class>{job.status.as_str()}</span>
            </div>
            <p class="preview-company">{job.company.clone()}</p>
            <div class="preview-meta">
                <span>"📍 " {or_not_specified(job.location.as_deref())}</span>
                <span>"💰 " {or_not_specified(job.salary_range.as_deref())}</span>
                <span>"🕒 " {job.job_type.label()}</span>
                <span>"📅 Posted " {posted}</span>
                <span>"👥 " {job.application_count} " applications"</span>
            </div>
            <h4>"Description"</h4>
            <p class="preview-description">{job.description.clone()}</p>
            <h4>"Requirements"</h4>
            <div class="skill-tags">
                {requirements.into_iter().map(|r| view! { <span class="skill-tag">{r}</span> }).collect_view()}
            </div>
            <div class="modal-actions">
                <button class="btn btn-primary" on:click=move |_| { modal.update(|m| { m.edit(); }); }>
                    "Edit"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || modal.with(|m| m.is_refreshing())
                    on:click=move |_| ctx.toggle_job_status()
                >
                    {job.status.toggle_label()}
                </button>
                <button class="btn btn-secondary" on:click=move |_| ctx.open_applications(id)>
                    "View Applications"
                </button>
                <button
                    class="btn btn-danger"
                    disabled=move || modal.with(|m| m.is_refreshing())
                    on:click={move |_| ctx.request_delete::<Job>()}
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

fn job_form(ctx: AppContext) -> impl IntoView {
    let modal = ctx.job_modal;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        ctx.save::<Job>();
    };

    view! {
        <form class="edit-form" on:submit=on_submit>
            {draft_input(modal, "title", "Job Title", "text")}
            {draft_input(modal, "company", "Company", "text")}
            {draft_input(modal, "location", "Location", "text")}
            {draft_input(modal, "salary_range", "Salary Range", "text")}
            <div class="form-group">
                <label for="job_type">"Job Type"</label>
                <select
                    id="job_type"
                    prop:value=move || modal.with(|m| m.field("job_type"))
                    on:change=move |ev| modal.update(|m| m.set_field("job_type", event_target_value(&ev)))
                >
                    {JobType::ALL
                        .iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label for="status">"Status"</label>
                <select
                    id="status"
                    prop:value=move || modal.with(|m| m.field("status"))
                    on:change=move |ev| modal.update(|m| m.set_field("status", event_target_value(&ev)))
                >
                    {JobStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            {draft_textarea(modal, "description", "Description")}
            {draft_textarea(modal, "requirements", "Requirements (comma separated)")}
            <div class="modal-actions">
                <button type="button" class="btn btn-secondary" on:click={move |_| ctx.cancel_edit::<Job>()}>
                    "Cancel"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || modal.with(|m| m.submit_disabled())>
                    {move || modal.with(|m| m.submit_label())}
                </button>
            </div>
        </form>
    }
}
