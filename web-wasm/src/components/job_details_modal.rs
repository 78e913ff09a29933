//! Read-only job details on the public listing

use careersync_common::format::{format_date, or_not_specified};
use careersync_common::Job;
use leptos::prelude::*;

use crate::components::modal_frame::ModalFrame;
use crate::state::AppContext;

#[component]
pub fn JobDetailsModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let details = ctx.details;

    let open = Signal::derive(move || details.with(|d| d.is_open()));
    let title = Signal::derive(move || {
        details.with(|d| d.job().map(|j| j.title.clone()).unwrap_or_else(|| "Job Details".to_string()))
    });

    let body = move || {
        details.with(|d| {
            if d.is_loading() {
                view! { <div class="loading-state">"Loading job details..."</div> }.into_any()
            } else if let Some(message) = d.error() {
                view! { <div class="error-state">{message.to_string()}</div> }.into_any()
            } else {
                d.job().cloned().map(|job| details_view(ctx, job)).into_any()
            }
        })
    };

    view! {
        <ModalFrame open=open title=title on_close=move |_| ctx.details.update(|d| d.close()) class="job-details-modal">
            {body}
        </ModalFrame>
    }
}

fn details_view(ctx: AppContext, job: Job) -> impl IntoView {
    let id = job.id;
    let requirements = job.requirement_list();
    let description = if job.description.trim().is_empty() {
        "No description available".to_string()
    } else {
        job.description.clone()
    };
    let requirement_items = if requirements.is_empty() {
        view! { <li>"No specific requirements listed"</li> }.into_any()
    } else {
        requirements.into_iter().map(|r| view! { <li>{r}</li> }).collect_view().into_any()
    };

    view! {
        <div class="job-details-content">
            <div class="company-info">
                <div class="company-name">{job.company.clone()}</div>
                <div class="job-location">{or_not_specified(job.location.as_deref())}</div>
            </div>
            <div class="job-details-meta">
                <span>{job.job_type.label()}</span>
                <span>{or_not_specified(job.salary_range.as_deref())}</span>
                <span>"Posted " {format_date(job.created_at.as_deref().unwrap_or_default())}</span>
                <span>{job.application_count} " applications"</span>
                {job.hr_name.clone().map(|hr| view! { <span>"Posted by " {hr}</span> })}
            </div>
            <div class="job-details-section">
                <h4>"Job Description"</h4>
                <p class="job-details-content-text">{description}</p>
            </div>
            <div class="job-details-section">
                <h4>"Requirements"</h4>
                <ul>{requirement_items}</ul>
            </div>
            <div class="modal-actions">
                <button class="btn btn-primary" on:click=move |_| {
                    ctx.details.update(|d| d.close());
                    ctx.apply_for_job(id);
                }>
                    "Apply Now"
                </button>
            </div>
        </div>
    }
}
