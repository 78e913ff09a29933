//! Wire types mirroring the backend JSON
//!
//! - Job / Candidate: single entities behind the preview/edit modals
//! - Application: one row of a job's applications list
//! - response envelopes for list, search and mutation endpoints
//!
//! These are transient view-models; nothing here is persisted by the client.

use serde::{Deserialize, Serialize};

pub type JobId = i64;
pub type CandidateId = i64;
pub type ApplicationId = i64;

/// Employment type of a job posting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    #[default]
    Fulltime,
    Parttime,
    Contract,
    Remote,
    Internship,
    #[serde(other)]
    Other,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Fulltime => "fulltime",
            JobType::Parttime => "parttime",
            JobType::Contract => "contract",
            JobType::Remote => "remote",
            JobType::Internship => "internship",
            JobType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::Fulltime => "Full-time",
            JobType::Parttime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
            JobType::Internship => "Internship",
            JobType::Other => "Other",
        }
    }

    pub const ALL: [JobType; 5] = [
        JobType::Fulltime,
        JobType::Parttime,
        JobType::Contract,
        JobType::Remote,
        JobType::Internship,
    ];
}

/// Posting status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }

    /// Label of the button that flips this status.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            JobStatus::Active => "Close Job",
            _ => "Activate Job",
        }
    }

    pub const ALL: [JobStatus; 3] = [JobStatus::Active, JobStatus::Closed, JobStatus::Draft];
}

/// Status of a single application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
    #[serde(other)]
    Other,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Other => "other",
        }
    }

    /// Counted in the "N active" badge of the applications panel.
    pub fn is_active(&self) -> bool {
        matches!(self, ApplicationStatus::Pending | ApplicationStatus::Shortlisted)
    }
}

/// Role carried in the page session block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Hr,
    #[serde(alias = "job_seeker", alias = "candidate")]
    Jobseeker,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: JobType,
    pub description: String,
    /// Comma-separated skill list
    pub requirements: String,
    pub status: JobStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(alias = "applications")]
    pub application_count: u32,
    /// Only filled by the details endpoint
    pub hr_name: Option<String>,
}

impl Job {
    pub fn requirement_list(&self) -> Vec<String> {
        split_skills(&self.requirements)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Comma-separated skill list
    pub skills: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: Option<String>,
}

impl Candidate {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills.as_deref().map(split_skills).unwrap_or_default()
    }

    /// Avatar initials: first letters of the first two words, or the
    /// first letter doubled for a one-word name.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        match (words.next(), words.next()) {
            (Some(first), Some(second)) => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect::<String>()
                .to_uppercase(),
            (Some(only), None) => only
                .chars()
                .take(1)
                .collect::<String>()
                .repeat(2)
                .to_uppercase(),
            _ => "CD".to_string(),
        }
    }
}

/// Split a comma-separated list, trimming and dropping empty entries.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One application, normalised from either list endpoint shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ApplicationWire")]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: Option<CandidateId>,
    pub job_id: Option<JobId>,
    pub status: ApplicationStatus,
    pub applied_at: Option<String>,
    /// Backend-computed match score, 0-100
    pub match_score: Option<u32>,
    pub candidate: Candidate,
}

/// `/api/applications/{id}` embeds a `candidate` object,
/// `/api/job/{id}/applications` flattens name/email/phone.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ApplicationWire {
    id: ApplicationId,
    candidate_id: Option<CandidateId>,
    job_id: Option<JobId>,
    status: ApplicationStatus,
    applied_at: Option<String>,
    match_score: Option<u32>,
    candidate: Option<Candidate>,
    candidate_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl From<ApplicationWire> for Application {
    fn from(wire: ApplicationWire) -> Self {
        let mut candidate = wire.candidate.unwrap_or_default();
        if let Some(name) = wire.candidate_name {
            candidate.name = name;
        }
        if let Some(email) = wire.email {
            candidate.email = email;
        }
        if wire.phone.is_some() {
            candidate.phone = wire.phone;
        }
        let candidate_id = wire.candidate_id.or(if candidate.id != 0 { Some(candidate.id) } else { None });
        if let Some(id) = candidate_id {
            candidate.id = id;
        }

        Self {
            id: wire.id,
            candidate_id,
            job_id: wire.job_id,
            status: wire.status,
            applied_at: wire.applied_at,
            match_score: wire.match_score,
            candidate,
        }
    }
}

/// Applications list envelope (both endpoint variants)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationList {
    pub job_id: Option<JobId>,
    pub job_title: Option<String>,
    pub applications: Vec<Application>,
    #[serde(alias = "count")]
    pub total: Option<usize>,
}

/// `GET /api/jobs?...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobSearchResponse {
    pub jobs: Vec<Job>,
    pub count: Option<usize>,
}

/// Body of PUT / DELETE / toggle-status / save / apply responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MutationResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub status: Option<JobStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserialize_to_dict_shape() {
        let json = r#"{
            "id": 7,
            "title": "Backend Engineer",
            "company": "Acme",
            "location": null,
            "salary_range": "$100k - $120k",
            "description": "Build APIs",
            "requirements": "Rust, SQL , ,Docker",
            "job_type": "fulltime",
            "status": "closed",
            "created_at": "2024-01-15 09:30:00",
            "updated_at": "2024-01-16 10:00:00"
        }"#;

        let job: Job = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(job.id, 7);
        assert_eq!(job.location, None);
        assert_eq!(job.job_type, JobType::Fulltime);
        assert_eq!(job.status, JobStatus::Closed);
        assert_eq!(job.application_count, 0);
        assert_eq!(job.requirement_list(), vec!["Rust", "SQL", "Docker"]);
    }

    #[test]
    fn test_job_details_applications_alias() {
        let json = r#"{"id": 3, "title": "QA", "applications": 12, "hr_name": "Dana"}"#;
        let job: Job = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(job.application_count, 12);
        assert_eq!(job.hr_name.as_deref(), Some("Dana"));
    }

    #[test]
    fn test_unknown_job_type_maps_to_other() {
        let job: Job = serde_json::from_str(r#"{"job_type": "freelance"}"#).expect("deserialize failed");
        assert_eq!(job.job_type, JobType::Other);
    }

    #[test]
    fn test_candidate_initials() {
        let mut candidate = Candidate { name: "john smith".to_string(), ..Default::default() };
        assert_eq!(candidate.initials(), "JS");

        candidate.name = "Madonna".to_string();
        assert_eq!(candidate.initials(), "MM");

        candidate.name = "   ".to_string();
        assert_eq!(candidate.initials(), "CD");
    }

    #[test]
    fn test_candidate_skill_list_empty() {
        let candidate = Candidate::default();
        assert!(candidate.skill_list().is_empty());
    }

    #[test]
    fn test_application_embedded_candidate() {
        let json = r#"{
            "id": 1,
            "candidate_id": 9,
            "job_id": 4,
            "status": "shortlisted",
            "applied_at": "2024-02-01 12:00:00",
            "candidate": {"id": 9, "name": "Ann Lee", "email": "ann@example.com", "phone": null}
        }"#;
        let app: Application = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(app.candidate_id, Some(9));
        assert_eq!(app.candidate.name, "Ann Lee");
        assert_eq!(app.status, ApplicationStatus::Shortlisted);
    }

    #[test]
    fn test_application_flat_shape() {
        let json = r#"{
            "id": 2,
            "candidate_id": 5,
            "candidate_name": "Bo Chen",
            "email": "bo@example.com",
            "phone": "555-0100",
            "status": "interviewing",
            "match_score": 87
        }"#;
        let app: Application = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(app.candidate.id, 5);
        assert_eq!(app.candidate.name, "Bo Chen");
        assert_eq!(app.candidate.phone.as_deref(), Some("555-0100"));
        assert_eq!(app.status, ApplicationStatus::Other);
        assert_eq!(app.match_score, Some(87));
    }

    #[test]
    fn test_application_list_count_alias() {
        let json = r#"{"applications": [], "count": 0}"#;
        let list: ApplicationList = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(list.total, Some(0));
        assert!(list.job_title.is_none());
    }

    #[test]
    fn test_user_role_aliases() {
        let role: UserRole = serde_json::from_str(r#""jobseeker""#).expect("deserialize failed");
        assert_eq!(role, UserRole::Jobseeker);
        let role: UserRole = serde_json::from_str(r#""job_seeker""#).expect("deserialize failed");
        assert_eq!(role, UserRole::Jobseeker);
        let role: UserRole = serde_json::from_str(r#""admin""#).expect("deserialize failed");
        assert_eq!(role, UserRole::Unknown);
    }

    #[test]
    fn test_mutation_response_toggle_status() {
        let json = r#"{"success": true, "message": "Job status updated to closed", "status": "closed"}"#;
        let resp: MutationResponse = serde_json::from_str(json).expect("deserialize failed");
        assert!(resp.success);
        assert_eq!(resp.status, Some(JobStatus::Closed));
    }
}
