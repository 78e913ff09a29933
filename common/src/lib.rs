//! CareerSync client core
//!
//! Data model, request building and UI state machines shared by the web
//! front end and the native test suite. Nothing here touches the DOM or the
//! network.

pub mod types;
pub mod error;
pub mod format;
pub mod api;
pub mod config;
pub mod notify;
pub mod confirm;
pub mod modal;
pub mod filter;
pub mod job_list;
pub mod search;
pub mod apply;
pub mod applications;
pub mod dashboard;
pub mod keyboard;
pub mod post_job;

pub use types::{Application, ApplicationStatus, Candidate, Job, JobId, JobStatus, JobType, UserRole};
pub use error::{Error, Result, ValidationError};
pub use api::{ApiRequest, Body, Method, Pending};
pub use config::{ClientConfig, Page, PageData};
pub use notify::{NotificationKind, Notifier, ToastTicket};
pub use confirm::ConfirmDialog;
pub use modal::{Entity, EntityModal, ModalPhase, ModalView, Notice, Step};
pub use filter::{ListFilter, ListRow, Pagination, Selection, SortKey};
pub use job_list::JobList;
pub use search::{JobSearch, SearchState, SearchView};
pub use apply::{ApplyDecision, ApplyForm, ApplyGate, JobIdSet, SavedJobs, Session};
pub use applications::ApplicationsPanel;
pub use dashboard::ScoreBand;
pub use keyboard::Shortcut;
