//! Job application form with resume upload

use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;

use crate::components::modal_frame::ModalFrame;
use crate::state::AppContext;

#[component]
pub fn ApplyModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let form = ctx.apply_form;
    let resume_ref: NodeRef<Input> = NodeRef::new();

    let open = Signal::derive(move || form.with(|f| f.is_open()));
    let title = Signal::derive(|| "Apply for Job".to_string());

    // The frame stays mounted between jobs, so the picked file would carry over
    let target = Memo::new(move |_| form.with(|f| f.job_id()));
    Effect::new(move |_| {
        target.track();
        if let Some(input) = resume_ref.get_untracked() {
            input.set_value("");
        }
    });

    // File objects are not Send, so the input is read at submit time
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let file = resume_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        ctx.submit_application(file);
    };

    let hint = ctx.config.with_value(|c| {
        format!("PDF, DOC or DOCX, up to {} MB", c.max_resume_bytes / (1024 * 1024))
    });

    view! {
        <ModalFrame open=open title=title on_close=move |_| form.update(|f| f.close()) class="apply-modal">
            <form class="apply-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="apply-name">"Full Name *"</label>
                    <input
                        type="text"
                        id="apply-name"
                        prop:value=move || form.with(|f| f.form.name.clone())
                        on:input=move |ev| form.update(|f| f.form.name = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="apply-email">"Email *"</label>
                    <input
                        type="email"
                        id="apply-email"
                        prop:value=move || form.with(|f| f.form.email.clone())
                        on:input=move |ev| form.update(|f| f.form.email = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="apply-phone">"Phone"</label>
                    <input
                        type="tel"
                        id="apply-phone"
                        prop:value=move || form.with(|f| f.form.phone.clone())
                        on:input=move |ev| form.update(|f| f.form.phone = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="apply-resume">"Resume *"</label>
                    <input type="file" id="apply-resume" accept=".pdf,.doc,.docx" node_ref=resume_ref />
                    <small class="text-muted">{hint}</small>
                </div>
                <div class="form-group">
                    <label for="apply-cover">"Cover Letter"</label>
                    <textarea
                        id="apply-cover"
                        rows="5"
                        prop:value=move || form.with(|f| f.form.cover_letter.clone())
                        on:input=move |ev| form.update(|f| f.form.cover_letter = event_target_value(&ev))
                    />
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| form.update(|f| f.close())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || form.with(|f| f.is_submitting())>
                        {move || form.with(|f| f.submit_label())}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}
