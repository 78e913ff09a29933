//! Yes/no dialog guarding destructive actions

use leptos::prelude::*;

use crate::components::modal_frame::ModalFrame;
use crate::state::AppContext;

#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let confirm = ctx.confirm;

    let open = Signal::derive(move || confirm.with(|c| c.is_open()));
    let title = Signal::derive(move || confirm.with(|c| c.title().to_string()));

    view! {
        <ModalFrame open=open title=title on_close=move |_| ctx.cancel_confirm() class="confirm-modal">
            <p class="confirm-message">{move || confirm.with(|c| c.message().to_string())}</p>
            <div class="modal-actions">
                <button class="btn btn-secondary" on:click=move |_| ctx.cancel_confirm()>
                    "Cancel"
                </button>
                <button class="btn btn-danger" on:click=move |_| ctx.accept_confirm()>
                    "Confirm"
                </button>
            </div>
        </ModalFrame>
    }
}
