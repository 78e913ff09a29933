//! REST surface of the CareerSync backend
//!
//! Endpoint builders and response parsing. Transport lives in the web crate;
//! everything here is plain data so the request a state transition issues can
//! be asserted in native tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{CandidateId, JobId};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// Flat field map sent as a JSON object
    Json(BTreeMap<String, String>),
    /// Text fields of a multipart form; the transport attaches the file part
    Multipart(Vec<(String, String)>),
}

/// A request the caller must execute, relative to `ClientConfig::api_base`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: Body::Empty }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), body: Body::Empty }
    }

    pub fn put_json(path: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self { method: Method::Put, path: path.into(), body: Body::Json(fields) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: Body::Empty }
    }

    pub fn multipart(path: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self { method: Method::Post, path: path.into(), body: Body::Multipart(fields) }
    }

    /// Absolute URL for this request.
    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path)
    }
}

/// A request tagged with the generation token of the state machine that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub token: u64,
    pub request: ApiRequest,
}

/// Endpoint paths
pub mod endpoints {
    use super::*;

    /// `/api/{resource}/{id}` for GET / PUT / DELETE of a modal entity.
    pub fn entity(resource: &str, id: i64) -> String {
        format!("/api/{}/{}", resource, id)
    }

    pub fn job(id: JobId) -> String {
        entity("job", id)
    }

    pub fn candidate(id: CandidateId) -> String {
        entity("candidate", id)
    }

    pub fn job_toggle_status(id: JobId) -> String {
        format!("/api/job/{}/toggle-status", id)
    }

    pub fn job_details(id: JobId) -> String {
        format!("/api/job/{}/details", id)
    }

    /// Applications of one job, with embedded candidate objects.
    pub fn job_applications(id: JobId) -> String {
        format!("/api/applications/{}", id)
    }

    /// Flat per-job application rows; the only shape carrying `match_score`.
    pub fn job_application_scores(id: JobId) -> String {
        format!("/api/job/{}/applications", id)
    }

    /// `/api/jobs` plus an already-encoded query string (may be empty).
    pub fn jobs(query: &str) -> String {
        if query.is_empty() {
            "/api/jobs".to_string()
        } else {
            format!("/api/jobs?{}", query)
        }
    }

    pub fn save_job(id: JobId) -> String {
        format!("/save-job/{}", id)
    }

    pub fn unsave_job(id: JobId) -> String {
        format!("/unsave-job/{}", id)
    }

    pub fn apply(id: JobId) -> String {
        format!("/apply/{}", id)
    }

    /// Login page carrying a return target so the user lands back on the job.
    pub fn login_redirect(login_path: &str, jobs_path: &str, id: JobId) -> String {
        format!("{}?next={}&apply={}", login_path, urlencoding::encode(jobs_path), id)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Pull `{error}` (or `{message}`) out of an error response body.
pub fn parse_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Turn a raw HTTP response into a typed value or an [`Error::Http`].
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(Error::Http { status, message: parse_error_message(body) });
    }
    parse_json(body)
}

/// Like [`parse_response`] but ignores the body of a 2xx response.
pub fn check_response(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(Error::Http { status, message: parse_error_message(body) })
    }
}

pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
