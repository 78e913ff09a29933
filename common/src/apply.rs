//! Job application flow: login/role gate, application form, saved and
//! applied job sets

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::api::{endpoints, ApiRequest, Pending};
use crate::error::{Error, Result, ValidationError};
use crate::modal::Notice;
use crate::types::{Job, JobId, MutationResponse, UserRole};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const RESUME_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Login state as rendered by the server. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub logged_in: bool,
    pub user_type: UserRole,
}

/// Set of job ids mirrored to local storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobIdSet(BTreeSet<JobId>);

impl JobIdSet {
    pub fn contains(&self, id: JobId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: JobId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: JobId) -> bool {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = JobId> + '_ {
        self.0.iter().copied()
    }

    /// JSON array stored under `savedJobs` / `appliedJobs`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    /// Union of the server-rendered ids and the locally stored ones.
    pub fn merge(&mut self, other: &JobIdSet) {
        self.0.extend(other.iter());
    }
}

impl FromIterator<JobId> for JobIdSet {
    fn from_iter<T: IntoIterator<Item = JobId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of the client-side gate in front of the application form
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyDecision {
    /// Navigate to this URL
    RedirectToLogin(String),
    Reject(Notice),
    AlreadyApplied(Notice),
    OpenForm(JobId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyGate {
    pub login_path: String,
    pub jobs_path: String,
}

impl Default for ApplyGate {
    fn default() -> Self {
        Self { login_path: "/login".to_string(), jobs_path: "/jobs".to_string() }
    }
}

impl ApplyGate {
    pub fn check(&self, session: &Session, applied: &JobIdSet, job_id: JobId) -> ApplyDecision {
        if !session.logged_in {
            return ApplyDecision::RedirectToLogin(endpoints::login_redirect(
                &self.login_path,
                &self.jobs_path,
                job_id,
            ));
        }
        if session.user_type != UserRole::Jobseeker {
            return ApplyDecision::Reject(Notice::error("Only job seekers can apply for jobs"));
        }
        if applied.contains(job_id) {
            return ApplyDecision::AlreadyApplied(Notice::info("You have already applied for this job"));
        }
        ApplyDecision::OpenForm(job_id)
    }
}

/// Metadata of the selected resume file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl ResumeFile {
    /// Browsers leave `type` empty for some Word files; fall back to the extension.
    fn effective_mime(&self) -> &str {
        if !self.mime.is_empty() {
            return &self.mime;
        }
        let ext = self.name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => RESUME_MIME_TYPES[0],
            Some("doc") => RESUME_MIME_TYPES[1],
            Some("docx") => RESUME_MIME_TYPES[2],
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRules {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for ResumeRules {
    fn default() -> Self {
        Self {
            max_bytes: MAX_RESUME_BYTES,
            allowed_types: RESUME_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume: Option<ResumeFile>,
}

impl ApplicationForm {
    /// Text parts of the multipart body; the transport appends `resume`.
    pub fn fields(&self) -> Vec<(String, String)> {
        [
            ("name", self.name.trim()),
            ("email", self.email.trim()),
            ("phone", self.phone.trim()),
            ("cover_letter", self.cover_letter.trim()),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks run before anything is sent. The first failure wins.
pub fn validate_application(
    form: &ApplicationForm,
    rules: &ResumeRules,
) -> std::result::Result<(), ValidationError> {
    if form.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !is_valid_email(form.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    let resume = form.resume.as_ref().ok_or(ValidationError::MissingResume)?;
    if resume.size > rules.max_bytes {
        return Err(ValidationError::ResumeTooLarge(rules.max_bytes / (1024 * 1024)));
    }
    let mime = resume.effective_mime();
    if !rules.allowed_types.iter().any(|t| t == mime) {
        return Err(ValidationError::UnsupportedResumeType);
    }
    Ok(())
}

/// Result of feeding a submission response back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitOutcome {
    pub notice: Option<Notice>,
    /// Job that is now applied for; its button turns into "Applied"
    pub applied: Option<JobId>,
    pub stale: bool,
}

/// Application form modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyForm {
    job_id: Option<JobId>,
    pub form: ApplicationForm,
    submitting: bool,
    generation: u64,
}

impl ApplyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an empty form for `job_id`. Use [`ApplyGate::check`] first.
    pub fn open(&mut self, job_id: JobId) {
        self.job_id = Some(job_id);
        self.form = ApplicationForm::default();
        self.submitting = false;
        self.generation += 1;
    }

    /// Validate and build the multipart POST.
    ///
    /// Validation failures come back as [`Error::Validation`] and never
    /// produce a request.
    pub fn submit(&mut self, rules: &ResumeRules) -> Result<Pending> {
        let job_id = self
            .job_id
            .ok_or_else(|| Error::Config("application form is not open".to_string()))?;
        if self.submitting {
            return Err(Error::Config("application already being submitted".to_string()));
        }
        validate_application(&self.form, rules)?;

        self.submitting = true;
        self.generation += 1;
        debug!(job_id, "submitting application");
        Ok(Pending {
            token: self.generation,
            request: ApiRequest::multipart(endpoints::apply(job_id), self.form.fields()),
        })
    }

    pub fn finish_submit(
        &mut self,
        token: u64,
        result: Result<MutationResponse>,
        applied: &mut JobIdSet,
    ) -> SubmitOutcome {
        let Some(job_id) = self.job_id.filter(|_| token == self.generation && self.submitting) else {
            return SubmitOutcome { stale: true, ..Default::default() };
        };
        self.submitting = false;

        let result = result.and_then(|resp| {
            if resp.success || resp.error.is_none() {
                Ok(resp)
            } else {
                Err(Error::Http { status: 200, message: resp.error })
            }
        });

        match result {
            Ok(resp) => {
                info!(job_id, "application submitted");
                applied.insert(job_id);
                self.close();
                SubmitOutcome {
                    notice: Some(Notice::success(
                        resp.message.unwrap_or_else(|| "Application submitted successfully!".to_string()),
                    )),
                    applied: Some(job_id),
                    stale: false,
                }
            }
            Err(e) => {
                warn!(job_id, error = %e, "application failed");
                let fallback = match e {
                    Error::Http { .. } => "Application failed",
                    _ => "Error submitting application",
                };
                SubmitOutcome {
                    notice: Some(Notice::error(e.user_message(fallback))),
                    ..Default::default()
                }
            }
        }
    }

    pub fn close(&mut self) {
        self.job_id = None;
        self.form = ApplicationForm::default();
        self.submitting = false;
        self.generation += 1;
    }

    pub fn is_open(&self) -> bool {
        self.job_id.is_some()
    }

    pub fn job_id(&self) -> Option<JobId> {
        self.job_id
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Submit Application"
        }
    }
}

/// Saved jobs with an optimistic toggle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedJobs {
    ids: JobIdSet,
    /// Latest token and the saved flag to restore, per job with a request in flight
    in_flight: BTreeMap<JobId, (u64, bool)>,
    generation: u64,
}

impl SavedJobs {
    pub fn new(ids: JobIdSet) -> Self {
        Self { ids, ..Default::default() }
    }

    /// Flip the local flag right away and issue the save/unsave POST.
    pub fn toggle(&mut self, job_id: JobId) -> Pending {
        let was_saved = self.ids.contains(job_id);
        let path = if was_saved {
            self.ids.remove(job_id);
            endpoints::unsave_job(job_id)
        } else {
            self.ids.insert(job_id);
            endpoints::save_job(job_id)
        };
        self.generation += 1;
        self.in_flight.insert(job_id, (self.generation, was_saved));
        Pending { token: self.generation, request: ApiRequest::post(path) }
    }

    /// Failure restores the flag the user saw before the toggle.
    /// A superseded response yields `None`.
    pub fn finish(&mut self, job_id: JobId, token: u64, result: Result<()>) -> Option<Notice> {
        match self.in_flight.get(&job_id) {
            Some(&(latest, _)) if latest == token => {}
            _ => return None,
        }
        let (_, was_saved) = self.in_flight.remove(&job_id)?;

        match result {
            Ok(()) if was_saved => Some(Notice::info("Job removed from saved")),
            Ok(()) => Some(Notice::success("Job saved successfully!")),
            Err(e) => {
                warn!(job_id, error = %e, "save toggle failed, rolling back");
                if was_saved {
                    self.ids.insert(job_id);
                } else {
                    self.ids.remove(job_id);
                }
                Some(Notice::error("Error saving job"))
            }
        }
    }

    pub fn is_saved(&self, job_id: JobId) -> bool {
        self.ids.contains(job_id)
    }

    pub fn ids(&self) -> &JobIdSet {
        &self.ids
    }

    pub fn button_label(&self, job_id: JobId) -> &'static str {
        if self.is_saved(job_id) {
            "Saved"
        } else {
            "Save"
        }
    }
}

/// Read-only job details modal of the public listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDetails {
    job_id: Option<JobId>,
    job: Option<Job>,
    error: Option<String>,
    generation: u64,
}

impl JobDetails {
    pub fn open(&mut self, job_id: JobId) -> Pending {
        self.job_id = Some(job_id);
        self.job = None;
        self.error = None;
        self.generation += 1;
        Pending { token: self.generation, request: ApiRequest::get(endpoints::job_details(job_id)) }
    }

    /// Failures stay inside the modal as an error panel.
    pub fn finish(&mut self, token: u64, result: Result<Job>) -> bool {
        if token != self.generation || self.job_id.is_none() {
            return false;
        }
        match result {
            Ok(job) => self.job = Some(job),
            Err(e) => {
                warn!(job_id = ?self.job_id, error = %e, "failed to load job details");
                self.error = Some("Error loading job details".to_string());
            }
        }
        true
    }

    pub fn close(&mut self) {
        self.job_id = None;
        self.job = None;
        self.error = None;
        self.generation += 1;
    }

    pub fn is_open(&self) -> bool {
        self.job_id.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_open() && self.job.is_none() && self.error.is_none()
    }

    pub fn job_id(&self) -> Option<JobId> {
        self.job_id
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
