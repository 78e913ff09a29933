//! Error types shared by the client core and the web front end

use thiserror::Error;

/// Client-side validation failures.
///
/// The `Display` text is what the user sees in the error toast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please upload your resume")]
    MissingResume,

    #[error("Resume file size must be less than {0}MB")]
    ResumeTooLarge(u64),

    #[error("Please upload a PDF or Word document")]
    UnsupportedResumeType,

    #[error("This field is required: {0}")]
    RequiredField(String),
}

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Text for the error toast.
    ///
    /// Server-supplied messages and validation messages win; everything
    /// else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Http { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            Error::Validation(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
