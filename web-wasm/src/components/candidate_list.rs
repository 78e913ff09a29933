//! Candidate cards of the candidates page

use careersync_common::format::or_not_specified;
use careersync_common::Candidate;
use leptos::prelude::*;

use crate::state::AppContext;

#[component]
pub fn CandidateList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let candidates = ctx.candidates;

    view! {
        <section class="candidate-list">
            <Show
                when=move || !candidates.with(|c| c.is_empty())
                fallback=|| view! { <p class="text-muted">"No candidates yet."</p> }
            >
                <For
                    each=move || candidates.get()
                    key=|c| (c.id, c.name.clone(), c.email.clone(), c.experience.clone())
                    children=move |candidate: Candidate| {
                        let id = candidate.id;
                        view! {
                            <div class="candidate-card">
                                <div class="candidate-avatar">{candidate.initials()}</div>
                                <div class="candidate-info">
                                    <h3>{candidate.name.clone()}</h3>
                                    <p class="text-muted">{candidate.email.clone()}</p>
                                    <p>{or_not_specified(candidate.experience.as_deref())}</p>
                                </div>
                                <div class="row-actions">
                                    <button class="btn btn-small" on:click={move |_| ctx.open_entity::<Candidate>(id)}>
                                        "View"
                                    </button>
                                    <button
                                        class="btn btn-small"
                                        on:click={move |_| ctx.open_entity_for_edit::<Candidate>(id)}
                                    >
                                        "Edit"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </Show>
        </section>
    }
}
