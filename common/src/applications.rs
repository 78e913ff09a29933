//! "Applications for <job>" panel
//!
//! Loads the job first (for the title), then its application list, then the
//! flat per-job rows that carry match scores. All three requests share the
//! panel's generation, so reopening for another job or closing drops whatever
//! is still in flight.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::api::{endpoints, ApiRequest, Pending};
use crate::error::Result;
use crate::filter::{ListFilter, ListRow};
use crate::modal::Notice;
use crate::types::{Application, ApplicationList, Job, JobId};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelState {
    #[default]
    Closed,
    LoadingJob,
    LoadingApplications,
    Loaded(Vec<Application>),
    Failed,
}

/// Effects of feeding a response into the panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelStep {
    pub notice: Option<Notice>,
    pub next: Option<Pending>,
    pub stale: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationsPanel {
    job_id: Option<JobId>,
    job_title: Option<String>,
    state: PanelState,
    /// Status and free-text narrowing of the rows
    pub filter: ListFilter,
    generation: u64,
}

impl ApplicationsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, job_id: JobId) -> Pending {
        self.job_id = Some(job_id);
        self.job_title = None;
        self.state = PanelState::LoadingJob;
        self.filter.clear();
        self.issue(ApiRequest::get(endpoints::job(job_id)))
    }

    fn issue(&mut self, request: ApiRequest) -> Pending {
        self.generation += 1;
        Pending { token: self.generation, request }
    }

    /// Job metadata arrived; on success the list request follows.
    pub fn finish_job(&mut self, token: u64, result: Result<Job>) -> PanelStep {
        if token != self.generation || self.state != PanelState::LoadingJob {
            return PanelStep { stale: true, ..Default::default() };
        }
        let Some(job_id) = self.job_id else {
            return PanelStep { stale: true, ..Default::default() };
        };

        match result {
            Ok(job) => {
                self.job_title = Some(job.title);
                self.state = PanelState::LoadingApplications;
                PanelStep {
                    next: Some(self.issue(ApiRequest::get(endpoints::job_applications(job_id)))),
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(job_id, error = %e, "failed to load job for applications panel");
                self.state = PanelState::Failed;
                PanelStep { notice: Some(Notice::error(e.user_message("Error loading job details"))), ..Default::default() }
            }
        }
    }

    /// Application list arrived.
    pub fn finish(&mut self, token: u64, result: Result<ApplicationList>) -> PanelStep {
        if token != self.generation || self.state != PanelState::LoadingApplications {
            return PanelStep { stale: true, ..Default::default() };
        }

        match result {
            Ok(list) => {
                debug!(job_id = ?self.job_id, count = list.applications.len(), "applications loaded");
                if self.job_title.is_none() {
                    self.job_title = list.job_title;
                }
                let needs_scores = list.applications.iter().any(|a| a.match_score.is_none());
                self.state = PanelState::Loaded(list.applications);
                match self.job_id {
                    Some(job_id) if needs_scores => PanelStep {
                        next: Some(self.issue(ApiRequest::get(endpoints::job_application_scores(job_id)))),
                        ..Default::default()
                    },
                    _ => PanelStep::default(),
                }
            }
            Err(e) => {
                warn!(job_id = ?self.job_id, error = %e, "failed to load applications");
                self.state = PanelState::Failed;
                PanelStep { notice: Some(Notice::error(e.user_message("Error loading applications"))), ..Default::default() }
            }
        }
    }

    /// Match scores arrived. A failure only leaves the score column empty.
    pub fn finish_scores(&mut self, token: u64, result: Result<ApplicationList>) -> PanelStep {
        if token != self.generation {
            return PanelStep { stale: true, ..Default::default() };
        }
        let PanelState::Loaded(apps) = &mut self.state else {
            return PanelStep { stale: true, ..Default::default() };
        };

        match result {
            Ok(list) => {
                let scores: HashMap<i64, u32> = list
                    .applications
                    .iter()
                    .filter_map(|a| a.match_score.map(|score| (a.id, score)))
                    .collect();
                for app in apps.iter_mut().filter(|a| a.match_score.is_none()) {
                    app.match_score = scores.get(&app.id).copied();
                }
            }
            Err(e) => debug!(job_id = ?self.job_id, error = %e, "match scores unavailable"),
        }
        PanelStep::default()
    }

    pub fn close(&mut self) {
        self.job_id = None;
        self.job_title = None;
        self.state = PanelState::Closed;
        self.generation += 1;
    }

    pub fn is_open(&self) -> bool {
        self.state != PanelState::Closed
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::LoadingJob | PanelState::LoadingApplications)
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn job_id(&self) -> Option<JobId> {
        self.job_id
    }

    pub fn title(&self) -> String {
        match &self.job_title {
            Some(title) => format!("Applications for {}", title),
            None => "Applications".to_string(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        match &self.state {
            PanelState::Loaded(apps) => apps,
            _ => &[],
        }
    }

    pub fn total(&self) -> usize {
        self.applications().len()
    }

    /// Pending plus shortlisted.
    pub fn active_count(&self) -> usize {
        self.applications().iter().filter(|a| a.status.is_active()).count()
    }

    /// `"3 applications"`, or `"Loading..."` before the list arrives.
    pub fn total_label(&self) -> String {
        match self.state {
            PanelState::Loaded(_) => format!("{} applications", self.total()),
            _ => "Loading...".to_string(),
        }
    }

    pub fn active_label(&self) -> String {
        match self.state {
            PanelState::Loaded(_) => format!("{} active", self.active_count()),
            _ => "Loading...".to_string(),
        }
    }

    /// Rows passing the panel filter, in server order.
    pub fn visible(&self) -> Vec<&Application> {
        let apps = self.applications();
        let rows: Vec<ListRow> = apps.iter().map(ListRow::from_application).collect();
        apps.iter()
            .zip(rows.iter())
            .filter(|(_, row)| self.filter.matches(row))
            .map(|(app, _)| app)
            .collect()
    }

    /// Placeholder text for the table body, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match &self.state {
            PanelState::LoadingJob | PanelState::LoadingApplications => Some("Loading applications..."),
            PanelState::Loaded(apps) if apps.is_empty() => Some("No applications found for this job."),
            PanelState::Failed => Some("Error loading applications"),
            _ => None,
        }
    }
}
