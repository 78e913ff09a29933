//! "Post a job" form; validated here, submitted natively to the server

use std::collections::BTreeMap;

use careersync_common::modal::FormFields;
use careersync_common::post_job::{validate_post_job, CREATE_JOB_PATH, REQUIRED_MESSAGE};
use careersync_common::{JobType, ValidationError};
use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use tracing::debug;

use crate::components::modal_frame::ModalFrame;
use crate::state::AppContext;

#[component]
pub fn PostJobModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let open_signal = ctx.post_job_open;

    let fields = RwSignal::new(FormFields::new());
    let errors = RwSignal::new(BTreeMap::<&'static str, ValidationError>::new());
    let posting = RwSignal::new(false);

    let close = move |_: ()| {
        open_signal.set(false);
        errors.update(|e| e.clear());
    };

    let on_submit = move |ev: SubmitEvent| {
        let found = fields.with(validate_post_job);
        if !found.is_empty() {
            ev.prevent_default();
            debug!(missing = found.len(), "post job form incomplete");
            errors.set(found);
            return;
        }
        errors.update(|e| e.clear());
        posting.set(true);
    };

    let open = Signal::derive(move || open_signal.get());
    let title = Signal::derive(|| "Post a New Job".to_string());

    let field = move |name: &'static str, label: &'static str, multiline: bool| {
        let has_error = move || errors.with(|e| e.contains_key(name));
        let on_input = move |ev: Event| {
            fields.update(|f| {
                f.insert(name.to_string(), event_target_value(&ev));
            });
            errors.update(|e| {
                e.remove(name);
            });
        };
        let control = if multiline {
            view! {
                <textarea id=name name=name rows="4" class:error=has_error on:input=on_input />
            }
            .into_any()
        } else {
            view! {
                <input type="text" id=name name=name class:error=has_error on:input=on_input />
            }
            .into_any()
        };
        view! {
            <div class="form-group">
                <label for=name>{label}</label>
                {control}
                <Show when=has_error>
                    <span class="field-error">{REQUIRED_MESSAGE}</span>
                </Show>
            </div>
        }
    };

    view! {
        <ModalFrame open=open title=title on_close=close class="post-job-modal">
            <form class="post-job-form" method="post" action=CREATE_JOB_PATH on:submit=on_submit>
                {field("title", "Job Title *", false)}
                {field("company", "Company *", false)}
                {field("location", "Location", false)}
                {field("salary_range", "Salary Range", false)}
                <div class="form-group">
                    <label for="post-job-type">"Job Type *"</label>
                    <select
                        id="post-job-type"
                        name="job_type"
                        class:error=move || errors.with(|e| e.contains_key("job_type"))
                        on:change=move |ev| {
                            fields.update(|f| {
                                f.insert("job_type".to_string(), event_target_value(&ev));
                            });
                            errors.update(|e| {
                                e.remove("job_type");
                            });
                        }
                    >
                        <option value="">"Select type"</option>
                        {JobType::ALL
                            .iter()
                            .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                            .collect_view()}
                    </select>
                    <Show when=move || errors.with(|e| e.contains_key("job_type"))>
                        <span class="field-error">{REQUIRED_MESSAGE}</span>
                    </Show>
                </div>
                {field("description", "Description *", true)}
                {field("requirements", "Requirements (comma separated) *", true)}
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| close(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || posting.get()>
                        {move || if posting.get() { "Posting..." } else { "Post Job" }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}
