//! Overlay, header and close button shared by every modal

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use careersync_common::{EntityModal, Entity};

#[component]
pub fn ModalFrame<F>(
    open: Signal<bool>,
    title: Signal<String>,
    on_close: F,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let overlay_class = move || {
        let mut classes = vec!["modal"];
        if !class.is_empty() {
            classes.push(class);
        }
        if open.get() {
            classes.push("show");
        }
        classes.join(" ")
    };

    // Only a click on the backdrop itself closes
    let on_backdrop = {
        let on_close = on_close.clone();
        move |ev: MouseEvent| {
            if ev.target().is_some() && ev.target() == ev.current_target() {
                on_close(());
            }
        }
    };

    view! {
        <div class=overlay_class on:click=on_backdrop>
            <div class="modal-content">
                <div class="modal-header">
                    <h2>{move || title.get()}</h2>
                    <button class="modal-close" on:click=move |_| on_close(())>"×"</button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

/// Labelled text input bound to one draft field of an entity modal.
pub fn draft_input<E>(
    modal: RwSignal<EntityModal<E>>,
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView
where
    E: Entity + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <input
                type=input_type
                id=name
                name=name
                prop:value=move || modal.with(|m| m.field(name))
                on:input=move |ev| modal.update(|m| m.set_field(name, event_target_value(&ev)))
            />
        </div>
    }
}

pub fn draft_textarea<E>(modal: RwSignal<EntityModal<E>>, name: &'static str, label: &'static str) -> impl IntoView
where
    E: Entity + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <textarea
                id=name
                name=name
                rows="4"
                prop:value=move || modal.with(|m| m.field(name))
                on:input=move |ev| modal.update(|m| m.set_field(name, event_target_value(&ev)))
            />
        </div>
    }
}
