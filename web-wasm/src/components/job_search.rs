//! Public job listing: filters, active tags and result cards

use careersync_common::format::{format_date, format_relative_date};
use careersync_common::search::{FilterField, FilterTag};
use careersync_common::{Job, JobType, SearchView};
use chrono::NaiveDateTime;
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use crate::bootstrap::now;
use crate::state::AppContext;

const SALARY_OPTIONS: [(&str, &str); 4] = [
    ("0-50000", "Under $50k"),
    ("50000-100000", "$50k - $100k"),
    ("100000-150000", "$100k - $150k"),
    ("150000+", "$150k+"),
];

const EXCERPT_CHARS: usize = 200;
const CARD_TAGS: usize = 4;

fn option_label(field: FilterField, value: &str) -> String {
    match field {
        FilterField::JobType => JobType::ALL
            .iter()
            .find(|t| t.as_str() == value)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| value.to_string()),
        FilterField::Salary => SALARY_OPTIONS
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[component]
pub fn JobSearch() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let search = ctx.search;
    let state = ctx.search_state;

    let set_debounced = move |field: FilterField, value: String| {
        search.update(|s| s.set(field, value));
        ctx.search_debounced();
    };
    let set_now = move |field: FilterField, value: String| {
        search.update(|s| s.set(field, value));
        ctx.run_search();
    };

    let tags = move || search.with(|s| s.active_tags_with(option_label));
    let remove_tag = move |field: FilterField| {
        search.update(|s| s.remove(field));
        ctx.run_search();
    };
    let clear_all = move |_| {
        search.update(|s| s.clear());
        ctx.run_search();
    };

    view! {
        <section class="job-search">
            <div class="search-filters">
                <input
                    type="search"
                    placeholder="Job title, company or keyword"
                    prop:value=move || search.with(|s| s.search.clone())
                    on:input=move |ev| set_debounced(FilterField::Search, event_target_value(&ev))
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ctx.run_search();
                        }
                    }
                />
                <select
                    prop:value=move || search.with(|s| s.job_type.clone())
                    on:change=move |ev| set_now(FilterField::JobType, event_target_value(&ev))
                >
                    <option value="">"All Types"</option>
                    {JobType::ALL
                        .iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Location"
                    prop:value=move || search.with(|s| s.location.clone())
                    on:input=move |ev| set_debounced(FilterField::Location, event_target_value(&ev))
                />
                <select
                    prop:value=move || search.with(|s| s.salary.clone())
                    on:change=move |ev| set_now(FilterField::Salary, event_target_value(&ev))
                >
                    <option value="">"Any Salary"</option>
                    {SALARY_OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || !search.with(|s| s.is_empty())>
                <div class="active-filters">
                    <For
                        each=tags
                        key=|tag: &FilterTag| tag.label.clone()
                        children=move |tag: FilterTag| {
                            let field = tag.field;
                            view! {
                                <span class="filter-tag">
                                    {tag.label}
                                    <button class="tag-remove" on:click=move |_| remove_tag(field)>"×"</button>
                                </span>
                            }
                        }
                    />
                    <button class="btn-link" on:click=clear_all>"Clear all"</button>
                </div>
            </Show>

            <div class="job-results">
                {move || state.with(|s| match s.view().clone() {
                    SearchView::Initial => {
                        let jobs = ctx.initial_jobs.get_value();
                        job_cards(ctx, jobs).into_any()
                    }
                    SearchView::Loading => view! {
                        <div class="loading-state">"Loading jobs..."</div>
                    }
                    .into_any(),
                    SearchView::Results { jobs, count } => view! {
                        <p class="results-count">{format!("{} jobs found", count)}</p>
                        {job_cards(ctx, jobs)}
                    }
                    .into_any(),
                    SearchView::Empty => view! {
                        <div class="empty-state">
                            <h3>"No jobs found"</h3>
                            <p>"Try adjusting your filters"</p>
                            <button class="btn btn-secondary" on:click=clear_all>"Clear Filters"</button>
                        </div>
                    }
                    .into_any(),
                    SearchView::Failed(message) => view! {
                        <div class="error-state">
                            <h3>{message}</h3>
                            <p>"Please try again later"</p>
                        </div>
                    }
                    .into_any(),
                })}
            </div>
        </section>
    }
}

fn job_cards(ctx: AppContext, jobs: Vec<Job>) -> impl IntoView {
    let today = now();
    jobs.into_iter().map(|job| job_card(ctx, job, today)).collect_view()
}

fn job_card(ctx: AppContext, job: Job, today: Option<NaiveDateTime>) -> impl IntoView {
    let id = job.id;
    let saved = ctx.saved;
    let applied = ctx.applied;

    let posted = match (job.created_at.as_deref(), today) {
        (Some(raw), Some(today)) => format_relative_date(raw, today),
        (Some(raw), None) => format_date(raw),
        (None, _) => "recently".to_string(),
    };
    let location = job
        .location
        .clone()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| "Location not specified".to_string());
    let tags: Vec<String> = job.requirement_list().into_iter().take(CARD_TAGS).collect();
    let type_class = format!("job-type-badge {}", job.job_type.as_str());

    view! {
        <div class="job-card">
            <div class="job-card-header">
                <div class="job-meta-badges">
                    <span class=type_class>{job.job_type.label()}</span>
                    {job.salary_range.clone().map(|s| view! { <span class="salary-badge">{s}</span> })}
                </div>
                <button
                    class=move || if saved.with(|s| s.is_saved(id)) { "btn btn-outline btn-sm saved" } else { "btn btn-outline btn-sm" }
                    on:click=move |_| ctx.toggle_saved(id)
                >
                    {move || saved.with(|s| s.button_label(id))}
                </button>
            </div>
            <div class="job-card-body">
                <h3 class="job-title">{job.title.clone()}</h3>
                <div class="company-info">
                    <div class="company-name">{job.company.clone()}</div>
                    <div class="job-location">{location}</div>
                </div>
                <p class="job-description">{excerpt(&job.description)}</p>
                <div class="job-tags">
                    {tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
                </div>
                <div class="job-meta">
                    <span>"Posted " {posted}</span>
                    <span>{job.application_count} " applicants"</span>
                </div>
            </div>
            <div class="job-card-footer">
                <button class="btn btn-secondary" on:click=move |_| ctx.open_details(id)>"View Details"</button>
                <button
                    class="btn btn-primary"
                    disabled=move || applied.with(|a| a.contains(id))
                    on:click=move |_| ctx.apply_for_job(id)
                >
                    {move || if applied.with(|a| a.contains(id)) { "Applied" } else { "Apply Now" }}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_excerpt_cuts_long_descriptions() {
        let long = "a".repeat(250);
        let cut = excerpt(&long);
        assert_eq!(cut.len(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }

    #[wasm_bindgen_test]
    fn test_option_labels() {
        assert_eq!(option_label(FilterField::JobType, "parttime"), "Part-time");
        assert_eq!(option_label(FilterField::Salary, "150000+"), "$150k+");
        assert_eq!(option_label(FilterField::Location, "Berlin"), "Berlin");
    }
}
