//! Server-backed job search (`GET /api/jobs?search=&type=&location=&salary=`)

use tracing::warn;

use crate::api::{endpoints, ApiRequest, Pending};
use crate::error::Result;
use crate::types::{Job, JobSearchResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    JobType,
    Location,
    Salary,
}

/// Removable chip for one active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
    pub field: FilterField,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    pub search: String,
    pub job_type: String,
    pub location: String,
    pub salary: String,
}

impl JobSearch {
    /// Encoded query string with only the non-empty filters.
    pub fn query_string(&self) -> String {
        [
            ("search", self.search.trim()),
            ("type", self.job_type.trim()),
            ("location", self.location.trim()),
            ("salary", self.salary.trim()),
        ]
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }

    pub fn request(&self) -> ApiRequest {
        ApiRequest::get(endpoints::jobs(&self.query_string()))
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Search => self.search = value,
            FilterField::JobType => self.job_type = value,
            FilterField::Location => self.location = value,
            FilterField::Salary => self.salary = value,
        }
    }

    pub fn remove(&mut self, field: FilterField) {
        self.set(field, String::new());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.active_tags().is_empty()
    }

    /// `label_of` maps a select value to its option text (`fulltime` -> `Full-time`).
    pub fn active_tags_with(&self, label_of: impl Fn(FilterField, &str) -> String) -> Vec<FilterTag> {
        let mut tags = Vec::new();
        let mut push = |field, prefix: &str, value: &str| {
            let value = value.trim();
            if !value.is_empty() {
                tags.push(FilterTag { field, label: format!("{}: {}", prefix, label_of(field, value)) });
            }
        };
        push(FilterField::JobType, "Job Type", &self.job_type);
        push(FilterField::Location, "Location", &self.location);
        push(FilterField::Salary, "Salary", &self.salary);

        let search = self.search.trim();
        if !search.is_empty() {
            tags.push(FilterTag { field: FilterField::Search, label: format!("Search: \"{}\"", search) });
        }
        tags
    }

    pub fn active_tags(&self) -> Vec<FilterTag> {
        self.active_tags_with(|_, v| v.to_string())
    }
}

/// What the results area shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchView {
    /// Server-rendered list, nothing fetched yet
    #[default]
    Initial,
    Loading,
    Results { jobs: Vec<Job>, count: usize },
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    view: SearchView,
    generation: u64,
}

impl SearchState {
    pub fn begin(&mut self, search: &JobSearch) -> Pending {
        self.generation += 1;
        self.view = SearchView::Loading;
        Pending { token: self.generation, request: search.request() }
    }

    /// Returns `false` for a superseded response.
    pub fn finish(&mut self, token: u64, result: Result<JobSearchResponse>) -> bool {
        if token != self.generation {
            return false;
        }

        self.view = match result {
            Ok(resp) => {
                // a missing or zero count falls back to the rows returned
                let count = resp.count.filter(|&c| c > 0).unwrap_or(resp.jobs.len());
                if resp.jobs.is_empty() {
                    SearchView::Empty
                } else {
                    SearchView::Results { jobs: resp.jobs, count }
                }
            }
            Err(e) => {
                warn!(error = %e, "job search failed");
                SearchView::Failed(e.user_message("Error loading jobs"))
            }
        };
        true
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.view == SearchView::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_query_string_skips_empty() {
        let search = JobSearch {
            search: "rust dev".to_string(),
            job_type: "fulltime".to_string(),
            ..Default::default()
        };
        assert_eq!(search.query_string(), "search=rust%20dev&type=fulltime");
        assert_eq!(search.request().path, "/api/jobs?search=rust%20dev&type=fulltime");
        assert_eq!(JobSearch::default().request().path, "/api/jobs");
    }

    #[test]
    fn test_active_tags_and_remove() {
        let mut search = JobSearch {
            search: "data".to_string(),
            location: "Remote".to_string(),
            salary: "100k+".to_string(),
            ..Default::default()
        };
        let labels: Vec<String> = search.active_tags().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["Location: Remote", "Salary: 100k+", "Search: \"data\""]);

        search.remove(FilterField::Location);
        assert_eq!(search.active_tags().len(), 2);
        search.clear();
        assert!(search.is_empty());
    }

    #[test]
    fn test_active_tags_with_labels() {
        let search = JobSearch { job_type: "parttime".to_string(), ..Default::default() };
        let tags = search.active_tags_with(|_, _| "Part-time".to_string());
        assert_eq!(tags[0].label, "Job Type: Part-time");
    }

    #[test]
    fn test_states() {
        let mut state = SearchState::default();
        let pending = state.begin(&JobSearch::default());
        assert!(state.is_loading());

        let resp = JobSearchResponse { jobs: vec![], count: Some(0) };
        assert!(state.finish(pending.token, Ok(resp)));
        assert_eq!(state.view(), &SearchView::Empty);

        let pending = state.begin(&JobSearch::default());
        assert!(state.finish(pending.token, Err(Error::Http { status: 500, message: None })));
        assert_eq!(state.view(), &SearchView::Failed("Error loading jobs".to_string()));
    }

    #[test]
    fn test_zero_count_with_jobs_shows_results() {
        let mut state = SearchState::default();
        let pending = state.begin(&JobSearch::default());
        let resp = JobSearchResponse { jobs: vec![Job { id: 5, ..Default::default() }], count: Some(0) };
        assert!(state.finish(pending.token, Ok(resp)));
        assert_eq!(
            state.view(),
            &SearchView::Results { jobs: vec![Job { id: 5, ..Default::default() }], count: 1 }
        );
    }

    #[test]
    fn test_stale_search_response_dropped() {
        let mut state = SearchState::default();
        let first = state.begin(&JobSearch { search: "a".into(), ..Default::default() });
        let second = state.begin(&JobSearch { search: "ab".into(), ..Default::default() });

        let late = JobSearchResponse { jobs: vec![Job::default()], count: None };
        assert!(!state.finish(first.token, Ok(late)));
        assert!(state.is_loading());

        let fresh = JobSearchResponse {
            jobs: vec![Job { id: 1, ..Default::default() }, Job { id: 2, ..Default::default() }],
            count: None,
        };
        assert!(state.finish(second.token, Ok(fresh)));
        match state.view() {
            SearchView::Results { jobs, count } => {
                assert_eq!(*count, 2);
                assert_eq!(jobs.len(), 2);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }
}
