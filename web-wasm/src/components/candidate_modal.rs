//! Candidate profile / edit modal

use careersync_common::format::{format_date, or_not_specified};
use careersync_common::{Candidate, ModalView};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::modal_frame::{draft_input, draft_textarea, ModalFrame};
use crate::state::AppContext;

#[component]
pub fn CandidateModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let modal = ctx.candidate_modal;

    let view_kind = Memo::new(move |_| modal.with(|m| m.view()));
    let snapshot = Memo::new(move |_| modal.with(|m| m.entity().cloned()));

    let open = Signal::derive(move || view_kind.get() != ModalView::Hidden);
    let title = Signal::derive(move || modal.with(|m| m.title()));

    let body = move || match view_kind.get() {
        ModalView::Preview => snapshot.get().map(|c| candidate_profile(ctx, c)).into_any(),
        ModalView::Edit => candidate_form(ctx).into_any(),
        ModalView::Hidden => ().into_any(),
    };

    view! {
        <ModalFrame open=open title=title on_close=move |_| modal.update(|m| m.close()) class="candidate-modal">
            {body}
        </ModalFrame>
    }
}

fn candidate_profile(ctx: AppContext, candidate: Candidate) -> impl IntoView {
    let modal = ctx.candidate_modal;
    let skills = candidate.skill_list();
    let joined = format_date(candidate.created_at.as_deref().unwrap_or_default());
    let resume = candidate.resume_url.clone().filter(|u| !u.trim().is_empty());

    view! {
        <div class="candidate-profile">
            <div class="profile-header">
                <div class="candidate-avatar">{candidate.initials()}</div>
                <div>
                    <h3>{candidate.name.clone()}</h3>
                    <p class="text-muted">{candidate.email.clone()}</p>
                </div>
            </div>
            <dl class="profile-details">
                <dt>"Phone"</dt>
                <dd>{or_not_specified(candidate.phone.as_deref())}</dd>
                <dt>"Experience"</dt>
                <dd>{or_not_specified(candidate.experience.as_deref())}</dd>
                <dt>"Education"</dt>
                <dd>{or_not_specified(candidate.education.as_deref())}</dd>
                <dt>"Joined"</dt>
                <dd>{joined}</dd>
            </dl>
            <h4>"Skills"</h4>
            <div class="skill-tags">
                {if skills.is_empty() {
                    view! { <span class="text-muted">"No skills specified"</span> }.into_any()
                } else {
                    skills
                        .into_iter()
                        .map(|s| view! { <span class="skill-tag">{s}</span> })
                        .collect_view()
                        .into_any()
                }}
            </div>
            {resume.map(|url| view! {
                <a class="btn btn-secondary" href=url target="_blank" rel="noopener noreferrer">
                    "View Resume"
                </a>
            })}
            <div class="modal-actions">
                <button class="btn btn-primary" on:click=move |_| { modal.update(|m| { m.edit(); }); }>
                    "Edit"
                </button>
                <button class="btn btn-danger" on:click={move |_| ctx.request_delete::<Candidate>()}>
                    "Delete"
                </button>
            </div>
        </div>
    }
}

fn candidate_form(ctx: AppContext) -> impl IntoView {
    let modal = ctx.candidate_modal;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        ctx.save::<Candidate>();
    };

    view! {
        <form class="edit-form" on:submit=on_submit>
            {draft_input(modal, "name", "Full Name", "text")}
            {draft_input(modal, "email", "Email", "email")}
            {draft_input(modal, "phone", "Phone", "tel")}
            {draft_input(modal, "experience", "Experience", "text")}
            {draft_input(modal, "education", "Education", "text")}
            {draft_input(modal, "resume_url", "Resume URL", "url")}
            {draft_textarea(modal, "skills", "Skills (comma separated)")}
            <div class="modal-actions">
                <button type="button" class="btn btn-secondary" on:click={move |_| ctx.cancel_edit::<Candidate>()}>
                    "Cancel"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || modal.with(|m| m.submit_disabled())>
                    {move || modal.with(|m| m.submit_label())}
                </button>
            </div>
        </form>
    }
}
