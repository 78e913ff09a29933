//! HR dashboard job table with client-side filtering

use careersync_common::filter::count_label;
use careersync_common::format::{format_date, or_not_specified};
use careersync_common::{Job, SortKey};
use leptos::prelude::*;

use crate::state::AppContext;

#[component]
pub fn JobTable() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = ctx.job_list;

    let visible = move || list.with(|l| l.visible().into_iter().cloned().collect::<Vec<_>>());
    let count = move || count_label(list.with(|l| l.apply_filter().count()), "job");
    let pages = move || list.with(|l| l.pagination());

    view! {
        <section class="job-table-section">
            <div class="table-filters">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search jobs..."
                    prop:value=move || list.with(|l| l.filter.query.clone())
                    on:input=move |ev| list.update(|l| l.filter.query = event_target_value(&ev))
                />
                <select
                    prop:value=move || list.with(|l| l.filter.status.clone())
                    on:change=move |ev| list.update(|l| l.filter.status = event_target_value(&ev))
                >
                    <option value="all">"All Status"</option>
                    <option value="active">"Active"</option>
                    <option value="closed">"Closed"</option>
                    <option value="draft">"Draft"</option>
                </select>
                <select
                    prop:value=move || list.with(|l| l.filter.sort.as_str())
                    on:change=move |ev| list.update(|l| l.filter.sort = SortKey::parse(&event_target_value(&ev)))
                >
                    <option value="newest">"Newest First"</option>
                    <option value="oldest">"Oldest First"</option>
                    <option value="applications">"Most Applications"</option>
                </select>
                <button
                    class="btn btn-tertiary"
                    disabled=move || list.with(|l| l.filter.is_default())
                    on:click=move |_| list.update(|l| l.filter.clear())
                >
                    "Clear"
                </button>
                <span class="results-count">{count}</span>
            </div>

            <table class="jobs-table">
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                prop:checked=move || list.with(|l| l.selection.all_checked())
                                on:change=move |ev| list.update(|l| l.select_all(event_target_checked(&ev)))
                            />
                        </th>
                        <th>"Job Title"</th>
                        <th>"Location"</th>
                        <th>"Status"</th>
                        <th>"Posted"</th>
                        <th>"Applications"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=visible
                        key=|job| (job.id, job.status, job.updated_at.clone(), job.application_count)
                        children=move |job| job_row(ctx, job)
                    />
                </tbody>
            </table>

            <div class="pagination">
                {move || {
                    let pages = pages();
                    (1..=pages.pages())
                        .map(|page| {
                            let class = if page == pages.active() { "page-btn active" } else { "page-btn" };
                            view! {
                                <button class=class on:click=move |_| list.update(|l| l.select_page(page))>
                                    {page}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

fn job_row(ctx: AppContext, job: Job) -> impl IntoView {
    let list = ctx.job_list;
    let id = job.id;
    let status_class = format!("status-badge status-{}", job.status.as_str());

    view! {
        <tr>
            <td>
                <input
                    type="checkbox"
                    prop:checked=move || list.with(|l| l.selection.is_selected(id))
                    on:change=move |_| list.update(|l| l.selection.toggle(id))
                />
            </td>
            <td>
                <a class="job-title-link" href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.open_entity::<Job>(id);
                }>
                    {job.title.clone()}
                </a>
                <div class="text-muted">{job.company.clone()}</div>
            </td>
            <td>{or_not_specified(job.location.as_deref())}</td>
            <td><span class=status_class>{job.status.as_str()}</span></td>
            <td>{format_date(job.created_at.as_deref().unwrap_or_default())}</td>
            <td>
                <button class="btn-link" on:click=move |_| ctx.open_applications(id)>
                    {job.application_count}
                </button>
            </td>
            <td class="row-actions">
                <button class="btn btn-small" title="View" on:click={move |_| ctx.open_entity::<Job>(id)}>
                    "View"
                </button>
                <button class="btn btn-small" title="Edit" on:click={move |_| ctx.open_entity_for_edit::<Job>(id)}>
                    "Edit"
                </button>
                <button
                    class="btn btn-small btn-danger"
                    title="Delete"
                    disabled=move || list.with(|l| l.is_deleting(id))
                    on:click=move |_| ctx.request_row_delete(id)
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
