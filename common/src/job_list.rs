//! HR job table: client-side filter, selection, pagination and row deletes

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::api::{endpoints, ApiRequest, Pending};
use crate::error::{Error, Result};
use crate::filter::{FilterResult, ListFilter, ListRow, Pagination, Selection};
use crate::modal::{DeletePrompt, Notice};
use crate::types::{Job, JobId, JobSearchResponse, MutationResponse};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobList {
    jobs: Vec<Job>,
    pub filter: ListFilter,
    pub selection: Selection,
    pages: Option<Pagination>,
    /// Row deletes in flight, by job id
    deleting: BTreeMap<JobId, u64>,
    reload_token: u64,
    generation: u64,
}

impl JobList {
    pub fn new(jobs: Vec<Job>) -> Self {
        let mut list = Self::default();
        list.replace(jobs);
        list
    }

    fn replace(&mut self, jobs: Vec<Job>) {
        self.pages = Some(Pagination::new(jobs.len(), PAGE_SIZE));
        for job in &self.jobs {
            if !jobs.iter().any(|j| j.id == job.id) {
                self.selection.forget(job.id);
            }
        }
        self.jobs = jobs;
    }

    fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.jobs.iter().map(ListRow::from_job).collect()
    }

    pub fn apply_filter(&self) -> FilterResult {
        self.filter.apply(&self.rows())
    }

    /// Jobs passing the filter, in display order.
    pub fn visible(&self) -> Vec<&Job> {
        self.apply_filter().visible.into_iter().map(|i| &self.jobs[i]).collect()
    }

    pub fn pagination(&self) -> Pagination {
        self.pages.unwrap_or_else(|| Pagination::new(0, PAGE_SIZE))
    }

    pub fn select_page(&mut self, page: usize) {
        let mut pages = self.pagination();
        pages.select(page);
        self.pages = Some(pages);
    }

    /// Every row follows the select-all box, including rows the filter hides.
    pub fn select_all(&mut self, checked: bool) {
        let ids: Vec<JobId> = self.jobs.iter().map(|j| j.id).collect();
        self.selection.set_all(checked, ids);
    }

    /// Full list refresh after an edit elsewhere on the page.
    pub fn reload(&mut self) -> Pending {
        self.reload_token = self.issue();
        Pending { token: self.reload_token, request: ApiRequest::get(endpoints::jobs("")) }
    }

    pub fn finish_reload(&mut self, token: u64, result: Result<JobSearchResponse>) -> Option<Notice> {
        if token != self.reload_token {
            return None;
        }
        match result {
            Ok(resp) => {
                self.replace(resp.jobs);
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to reload job list");
                Some(Notice::error(e.user_message("Error loading jobs")))
            }
        }
    }

    pub fn delete_prompt(&self, id: JobId) -> Option<DeletePrompt> {
        let job = self.jobs.iter().find(|j| j.id == id)?;
        Some(DeletePrompt {
            id,
            title: "Delete Job".to_string(),
            message: format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                job.title
            ),
        })
    }

    /// DELETE for a confirmed row. A second delete for the same row while
    /// one is in flight is ignored.
    pub fn delete(&mut self, id: JobId) -> Option<Pending> {
        if self.deleting.contains_key(&id) || !self.jobs.iter().any(|j| j.id == id) {
            return None;
        }
        let token = self.issue();
        self.deleting.insert(id, token);
        Some(Pending { token, request: ApiRequest::delete(endpoints::job(id)) })
    }

    /// Success removes the row in place; nothing is reloaded.
    pub fn finish_delete(&mut self, id: JobId, token: u64, result: Result<MutationResponse>) -> Option<Notice> {
        if self.deleting.get(&id) != Some(&token) {
            return None;
        }
        self.deleting.remove(&id);

        let result = result.and_then(|resp| match resp.error {
            Some(message) if !resp.success => Err(Error::Http { status: 200, message: Some(message) }),
            _ => Ok(()),
        });

        match result {
            Ok(()) => {
                info!(job_id = id, "job deleted");
                self.remove(id);
                Some(Notice::success("Job deleted successfully"))
            }
            Err(e) => {
                warn!(job_id = id, error = %e, "failed to delete job");
                let fallback = match e {
                    Error::Http { .. } => "Failed to delete job",
                    _ => "Error deleting job",
                };
                Some(Notice::error(e.user_message(fallback)))
            }
        }
    }

    /// Drop a row deleted elsewhere (e.g. from the preview modal).
    pub fn remove(&mut self, id: JobId) {
        let jobs: Vec<Job> = self.jobs.drain(..).filter(|j| j.id != id).collect();
        self.selection.forget(id);
        self.replace(jobs);
    }

    pub fn is_deleting(&self, id: JobId) -> bool {
        self.deleting.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<Job> {
        vec![
            Job { id: 1, title: "Backend Engineer".into(), application_count: 3, ..Default::default() },
            Job { id: 2, title: "Designer".into(), application_count: 9, ..Default::default() },
        ]
    }

    #[test]
    fn test_row_delete_prompt() {
        let list = JobList::new(jobs());
        let prompt = list.delete_prompt(2).expect("prompt");
        assert_eq!(
            prompt.message,
            "Are you sure you want to delete \"Designer\"? This action cannot be undone."
        );
        assert!(list.delete_prompt(99).is_none());
    }

    #[test]
    fn test_row_delete_success_removes_row() {
        let mut list = JobList::new(jobs());
        list.selection.toggle(2);
        let pending = list.delete(2).expect("delete request");
        assert_eq!(pending.request.path, "/api/job/2");
        assert!(list.delete(2).is_none());

        let resp = MutationResponse { success: true, ..Default::default() };
        let notice = list.finish_delete(2, pending.token, Ok(resp));
        assert_eq!(notice, Some(Notice::success("Job deleted successfully")));
        assert_eq!(list.jobs().len(), 1);
        assert!(!list.selection.is_selected(2));
        assert_eq!(list.apply_filter().count(), 1);
    }

    #[test]
    fn test_row_delete_failure_keeps_row() {
        let mut list = JobList::new(jobs());
        let pending = list.delete(1).expect("delete request");
        let resp = MutationResponse { success: false, error: Some("Job has applications".into()), ..Default::default() };
        let notice = list.finish_delete(1, pending.token, Ok(resp));
        assert_eq!(notice, Some(Notice::error("Job has applications")));
        assert_eq!(list.jobs().len(), 2);
        assert!(!list.is_deleting(1));
    }

    #[test]
    fn test_reload_replaces_rows() {
        let mut list = JobList::new(jobs());
        let pending = list.reload();
        assert_eq!(pending.request.path, "/api/jobs");
        let resp = JobSearchResponse { jobs: vec![Job { id: 5, ..Default::default() }], count: Some(1) };
        assert_eq!(list.finish_reload(pending.token, Ok(resp)), None);
        assert_eq!(list.jobs()[0].id, 5);
    }

    #[test]
    fn test_select_all_includes_hidden_rows() {
        let mut list = JobList::new(jobs());
        list.filter.query = "designer".into();
        assert_eq!(list.visible().len(), 1);

        list.select_all(true);
        assert!(list.selection.is_selected(1));
        assert!(list.selection.is_selected(2));
        assert!(list.selection.all_checked());

        list.select_all(false);
        assert!(list.selection.is_empty());
    }
}
