//! Client-side checks for the "Post a job" form
//!
//! The form itself posts natively to the server; these checks only decide
//! whether to let the submission through.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::modal::FormFields;

/// Form action of the post-job modal
pub const CREATE_JOB_PATH: &str = "/dashboard/hr/create-job";

pub const REQUIRED_FIELDS: [&str; 5] = ["title", "company", "description", "requirements", "job_type"];

/// Message shown under each empty required input
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Per-field errors, empty when the form can be submitted.
pub fn validate_post_job(fields: &FormFields) -> BTreeMap<&'static str, ValidationError> {
    REQUIRED_FIELDS
        .iter()
        .filter(|name| fields.get(**name).map_or(true, |v| v.trim().is_empty()))
        .map(|name| (*name, ValidationError::RequiredField(name.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_complete_form_passes() {
        let fields = form(&[
            ("title", "Rust Engineer"),
            ("company", "Acme"),
            ("description", "Build things"),
            ("requirements", "Rust, SQL"),
            ("job_type", "fulltime"),
            ("location", ""),
        ]);
        assert!(validate_post_job(&fields).is_empty());
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let fields = form(&[("title", "  "), ("company", "Acme"), ("job_type", "remote")]);
        let errors = validate_post_job(&fields);
        let names: Vec<&str> = errors.keys().copied().collect();
        assert_eq!(names, vec!["description", "requirements", "title"]);
        assert_eq!(errors["title"], ValidationError::RequiredField("title".to_string()));
    }
}
