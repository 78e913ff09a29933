//! Client-side filtering and sorting of rows already on the page
//!
//! Visibility = text contains query (case-insensitive) AND status matches.
//! Visible rows are then stable-sorted by the chosen key; hidden rows keep no
//! particular order.

use chrono::NaiveDateTime;
use std::collections::BTreeSet;

use crate::format::parse_timestamp;
use crate::types::{Application, Job};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    /// Application count, descending
    Applications,
}

impl SortKey {
    pub fn parse(s: &str) -> Self {
        match s {
            "oldest" => SortKey::Oldest,
            "applications" => SortKey::Applications,
            _ => SortKey::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Applications => "applications",
        }
    }
}

/// One filterable row
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: i64,
    /// Lower-cased concatenation of every visible cell
    pub text: String,
    pub status: String,
    pub date: Option<NaiveDateTime>,
    pub applications: u32,
}

impl ListRow {
    pub fn new(id: i64, cells: &[&str], status: &str, date: &str, applications: u32) -> Self {
        Self {
            id,
            text: cells.join(" ").to_lowercase(),
            status: status.to_lowercase(),
            date: parse_timestamp(date),
            applications,
        }
    }

    pub fn from_job(job: &Job) -> Self {
        Self::new(
            job.id,
            &[
                &job.title,
                &job.company,
                job.location.as_deref().unwrap_or(""),
                job.job_type.label(),
                job.status.as_str(),
            ],
            job.status.as_str(),
            job.created_at.as_deref().unwrap_or(""),
            job.application_count,
        )
    }

    pub fn from_application(app: &Application) -> Self {
        Self::new(
            app.id,
            &[
                &app.candidate.name,
                &app.candidate.email,
                app.candidate.phone.as_deref().unwrap_or(""),
                app.applied_at.as_deref().unwrap_or(""),
                app.status.as_str(),
            ],
            app.status.as_str(),
            app.applied_at.as_deref().unwrap_or(""),
            0,
        )
    }
}

/// Outcome of [`ListFilter::apply`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    /// Indices of visible rows in display order
    pub visible: Vec<usize>,
    /// Indices of hidden rows
    pub hidden: Vec<usize>,
}

impl FilterResult {
    pub fn count(&self) -> usize {
        self.visible.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub query: String,
    /// Empty (or `all`) means no status constraint
    pub status: String,
    pub sort: SortKey,
}

impl ListFilter {
    pub fn matches(&self, row: &ListRow) -> bool {
        let query = self.query.trim().to_lowercase();
        let status = self.status.trim().to_lowercase();
        let text_ok = query.is_empty() || row.text.contains(&query);
        let status_ok = status.is_empty() || status == "all" || row.status == status;
        text_ok && status_ok
    }

    pub fn apply(&self, rows: &[ListRow]) -> FilterResult {
        let (mut visible, hidden): (Vec<usize>, Vec<usize>) =
            (0..rows.len()).partition(|&i| self.matches(&rows[i]));

        // sort_by is stable: equal keys keep page order
        match self.sort {
            SortKey::Newest => visible.sort_by(|&a, &b| rows[b].date.cmp(&rows[a].date)),
            SortKey::Oldest => visible.sort_by(|&a, &b| rows[a].date.cmp(&rows[b].date)),
            SortKey::Applications => {
                visible.sort_by(|&a, &b| rows[b].applications.cmp(&rows[a].applications))
            }
        }

        FilterResult { visible, hidden }
    }

    /// Reset every input to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// `"3 jobs found"`
pub fn count_label(count: usize, noun: &str) -> String {
    format!("{} {}{} found", count, noun, if count == 1 { "" } else { "s" })
}

/// Row checkboxes plus a select-all box without an indeterminate state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    all: bool,
    selected: BTreeSet<i64>,
}

impl Selection {
    /// Select-all changed: every row follows its checked state.
    pub fn set_all(&mut self, checked: bool, ids: impl IntoIterator<Item = i64>) {
        self.all = checked;
        if checked {
            self.selected = ids.into_iter().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn forget(&mut self, id: i64) {
        self.selected.remove(&id);
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn all_checked(&self) -> bool {
        self.all
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Pagination tabs: only tracks which tab is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pages: usize,
    active: usize,
}

impl Pagination {
    pub fn new(total_rows: usize, page_size: usize) -> Self {
        let pages = total_rows.div_ceil(page_size.max(1)).max(1);
        Self { pages, active: 1 }
    }

    pub fn select(&mut self, page: usize) {
        if (1..=self.pages).contains(&page) {
            self.active = page;
        }
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn active(&self) -> usize {
        self.active
    }
}
