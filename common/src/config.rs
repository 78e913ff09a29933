//! Client configuration and server-rendered page bootstrap data
//!
//! Both arrive as JSON islands in the page (`careersync-config`,
//! `careersync-page`). Missing islands mean defaults.

use serde::{Deserialize, Serialize};

use crate::apply::{ApplyGate, JobIdSet, ResumeRules, Session, MAX_RESUME_BYTES, RESUME_MIME_TYPES};
use crate::error::{Error, Result};
use crate::notify::DEFAULT_TOAST_TIMEOUT_MS;
use crate::types::{Candidate, Job};

pub const CONFIG_ELEMENT_ID: &str = "careersync-config";
pub const PAGE_ELEMENT_ID: &str = "careersync-page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every API path; empty means same origin
    pub api_base: String,
    pub toast_timeout_ms: u32,
    pub search_debounce_ms: u32,
    pub max_resume_bytes: u64,
    pub allowed_resume_types: Vec<String>,
    pub login_path: String,
    pub jobs_path: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            search_debounce_ms: 300,
            max_resume_bytes: MAX_RESUME_BYTES,
            allowed_resume_types: RESUME_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
            login_path: "/login".into(),
            jobs_path: "/jobs".into(),
            log_level: "info".into(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.toast_timeout_ms == 0 {
            return Err(Error::Config("toast_timeout_ms must be positive".into()));
        }
        if self.allowed_resume_types.is_empty() {
            return Err(Error::Config("allowed_resume_types must not be empty".into()));
        }
        Ok(())
    }

    pub fn resume_rules(&self) -> ResumeRules {
        ResumeRules {
            max_bytes: self.max_resume_bytes,
            allowed_types: self.allowed_resume_types.clone(),
        }
    }

    pub fn apply_gate(&self) -> ApplyGate {
        ApplyGate { login_path: self.login_path.clone(), jobs_path: self.jobs_path.clone() }
    }
}

/// Which server page the script is running on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// HR dashboard with the job table
    Dashboard,
    /// Public job listing with search, save and apply
    Jobs,
    Candidates,
    Analytics,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub page: Page,
    pub session: Session,
    pub saved_job_ids: JobIdSet,
    pub applied_job_ids: JobIdSet,
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
}

impl PageData {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRole;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = ClientConfig::from_json("{}").expect("parse failed");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.toast_timeout_ms, 4000);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.max_resume_bytes, 5 * 1024 * 1024);
        assert_eq!(config.allowed_resume_types.len(), 3);
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig::from_json(r#"{"api_base": "https://jobs.example.com", "toast_timeout_ms": 3000}"#)
            .expect("parse failed");
        assert_eq!(config.api_base, "https://jobs.example.com");
        assert_eq!(config.toast_timeout_ms, 3000);
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.apply_gate().jobs_path, "/jobs");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(ClientConfig::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            ClientConfig::from_json(r#"{"toast_timeout_ms": 0}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_page_data() {
        let raw = r#"{
            "page": "jobs",
            "session": {"logged_in": true, "user_type": "jobseeker"},
            "saved_job_ids": [1, 2],
            "applied_job_ids": [3],
            "jobs": [{"id": 1, "title": "Engineer", "company": "Acme", "applications": 4}]
        }"#;
        let data = PageData::from_json(raw).expect("parse failed");
        assert_eq!(data.page, Page::Jobs);
        assert!(data.session.logged_in);
        assert_eq!(data.session.user_type, UserRole::Jobseeker);
        assert!(data.saved_job_ids.contains(2));
        assert!(data.applied_job_ids.contains(3));
        assert_eq!(data.jobs[0].application_count, 4);
        assert!(data.candidates.is_empty());
    }

    #[test]
    fn test_unknown_page() {
        let data = PageData::from_json(r#"{"page": "settings"}"#).expect("parse failed");
        assert_eq!(data.page, Page::Other);
    }
}
