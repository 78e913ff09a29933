//! Entity preview/edit modal
//!
//! One generic state machine serves both the Job and the Candidate modal:
//!
//! ```text
//! closed -> loading -> preview <-> editing -> saving -> (loading) -> preview
//!                                                    \-> editing (on failure)
//! ```
//!
//! Every request the modal issues carries a generation token. A response is
//! applied only when its token is the latest one issued; closing the modal
//! bumps the generation, so late responses for a closed or re-targeted modal
//! are dropped.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::api::{endpoints, ApiRequest, Pending};
use crate::error::Result;
use crate::notify::NotificationKind;
use crate::types::{Candidate, Job, MutationResponse};

/// Flat field-name -> value map backing an edit form
pub type FormFields = BTreeMap<String, String>;

/// Record type shown in an [`EntityModal`].
pub trait Entity: Clone + DeserializeOwned {
    /// Path segment under `/api/`; also used in lower-case messages
    const RESOURCE: &'static str;
    /// Capitalised noun for titles and success messages
    const LABEL: &'static str;
    const PREVIEW_TITLE: &'static str;
    const LOAD_ERROR: &'static str;

    fn id(&self) -> i64;

    /// Edit form values for this snapshot.
    fn form_fields(&self) -> FormFields;
}

impl Entity for Job {
    const RESOURCE: &'static str = "job";
    const LABEL: &'static str = "Job";
    const PREVIEW_TITLE: &'static str = "Job Preview";
    const LOAD_ERROR: &'static str = "Error loading job details";

    fn id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        fields([
            ("title", self.title.clone()),
            ("company", self.company.clone()),
            ("location", self.location.clone().unwrap_or_default()),
            ("salary_range", self.salary_range.clone().unwrap_or_default()),
            ("description", self.description.clone()),
            ("requirements", self.requirements.clone()),
            ("job_type", self.job_type.as_str().to_string()),
            ("status", self.status.as_str().to_string()),
        ])
    }
}

impl Entity for Candidate {
    const RESOURCE: &'static str = "candidate";
    const LABEL: &'static str = "Candidate";
    const PREVIEW_TITLE: &'static str = "Candidate Profile";
    const LOAD_ERROR: &'static str = "Error loading candidate profile";

    fn id(&self) -> i64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        fields([
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone().unwrap_or_default()),
            ("experience", self.experience.clone().unwrap_or_default()),
            ("education", self.education.clone().unwrap_or_default()),
            ("resume_url", self.resume_url.clone().unwrap_or_default()),
            ("skills", self.skills.clone().unwrap_or_default()),
        ])
    }
}

/// Swap the row with the same id for `entity`. Returns false when no row matches.
pub fn replace_entity<E: Entity>(rows: &mut [E], entity: &E) -> bool {
    match rows.iter_mut().find(|row| row.id() == entity.id()) {
        Some(row) => {
            *row = entity.clone();
            true
        }
        None => false,
    }
}

fn fields<const N: usize>(pairs: [(&str, String); N]) -> FormFields {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Loading,
    Preview,
    Editing,
    Saving,
}

/// What the modal body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView {
    Hidden,
    Preview,
    Edit,
}

/// Toast to show as the result of a transition
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Error }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Info }
    }
}

/// Side effects produced when a response is fed back into the modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub notice: Option<Notice>,
    /// Follow-up request (refresh after save or status toggle)
    pub next: Option<Pending>,
    /// Response belonged to a superseded request and was ignored
    pub stale: bool,
    /// Entity was changed on the server; list pages reload
    pub changed: Option<i64>,
    /// Entity was deleted on the server; list rows go away
    pub removed: Option<i64>,
    /// A fresh snapshot of this entity arrived; list rows showing it are patched
    pub refreshed: Option<i64>,
}

impl Step {
    fn stale() -> Self {
        Self { stale: true, ..Default::default() }
    }

    fn notice(notice: Notice) -> Self {
        Self { notice: Some(notice), ..Default::default() }
    }
}

/// Text for the confirmation dialog that guards a delete
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePrompt {
    pub id: i64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Delete,
    ToggleStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityModal<E> {
    phase: ModalPhase,
    current_id: Option<i64>,
    entity: Option<E>,
    draft: FormFields,
    open_in_edit: bool,
    mutation: Option<Mutation>,
    generation: u64,
}

impl<E> Default for EntityModal<E> {
    fn default() -> Self {
        Self {
            phase: ModalPhase::Closed,
            current_id: None,
            entity: None,
            draft: FormFields::new(),
            open_in_edit: false,
            mutation: None,
            generation: 0,
        }
    }
}

impl<E: Entity> EntityModal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `id` and show it in preview.
    pub fn open(&mut self, id: i64) -> Pending {
        self.open_with(id, false)
    }

    /// Fetch `id` and go straight to the edit form once it arrives.
    pub fn open_for_edit(&mut self, id: i64) -> Pending {
        self.open_with(id, true)
    }

    fn open_with(&mut self, id: i64, edit: bool) -> Pending {
        if self.current_id != Some(id) {
            self.entity = None;
            self.draft.clear();
        }
        self.current_id = Some(id);
        self.phase = ModalPhase::Loading;
        self.open_in_edit = edit;
        self.mutation = None;
        debug!(resource = E::RESOURCE, id, "loading entity");
        self.issue(ApiRequest::get(endpoints::entity(E::RESOURCE, id)))
    }

    fn issue(&mut self, request: ApiRequest) -> Pending {
        self.generation += 1;
        Pending { token: self.generation, request }
    }

    fn is_current(&self, token: u64) -> bool {
        token == self.generation && self.phase != ModalPhase::Closed
    }

    /// Apply the GET response for `token`.
    pub fn finish_load(&mut self, token: u64, result: Result<E>) -> Step {
        if !self.is_current(token) || self.phase != ModalPhase::Loading {
            debug!(resource = E::RESOURCE, token, "dropping stale load response");
            return Step::stale();
        }

        match result {
            Ok(entity) => {
                let id = entity.id();
                self.draft = entity.form_fields();
                self.entity = Some(entity);
                self.phase = if std::mem::take(&mut self.open_in_edit) {
                    ModalPhase::Editing
                } else {
                    ModalPhase::Preview
                };
                Step { refreshed: Some(id), ..Default::default() }
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id = ?self.current_id, error = %e, "failed to load entity");
                self.open_in_edit = false;
                if self.entity.is_some() {
                    // refresh of a modal already on screen: keep the last snapshot
                    self.phase = ModalPhase::Preview;
                } else {
                    self.reset();
                }
                Step::notice(Notice::error(e.user_message(E::LOAD_ERROR)))
            }
        }
    }

    /// Switch to the edit form, populated from the last fetched snapshot.
    /// Never touches the network.
    pub fn edit(&mut self) -> bool {
        match (&self.entity, self.phase) {
            (Some(entity), ModalPhase::Preview) => {
                self.draft = entity.form_fields();
                self.phase = ModalPhase::Editing;
                true
            }
            _ => false,
        }
    }

    /// Update one edit form field; ignored outside the editing state.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if self.phase == ModalPhase::Editing {
            self.draft.insert(name.to_string(), value.into());
        }
    }

    /// Leave the edit form and refetch the current entity.
    pub fn cancel_edit(&mut self) -> Option<Pending> {
        let id = self.current_id?;
        Some(self.open(id))
    }

    /// Submit the edit form as a PUT of the flat field map.
    pub fn save(&mut self) -> Option<Pending> {
        if self.phase != ModalPhase::Editing {
            return None;
        }
        let id = self.current_id?;
        self.phase = ModalPhase::Saving;
        let body = self.draft.clone();
        Some(self.issue(ApiRequest::put_json(endpoints::entity(E::RESOURCE, id), body)))
    }

    pub fn finish_save(&mut self, token: u64, result: Result<()>) -> Step {
        if !self.is_current(token) || self.phase != ModalPhase::Saving {
            return Step::stale();
        }
        let Some(id) = self.current_id else {
            return Step::stale();
        };

        match result {
            Ok(()) => Step {
                notice: Some(Notice::success(format!("{} updated successfully!", E::LABEL))),
                next: Some(self.open(id)),
                changed: Some(id),
                ..Default::default()
            },
            Err(e) => {
                warn!(resource = E::RESOURCE, id, error = %e, "failed to save entity");
                self.phase = ModalPhase::Editing;
                Step::notice(Notice::error(e.user_message(&format!("Error updating {}", E::RESOURCE))))
            }
        }
    }

    /// Confirmation text for deleting the entity on screen.
    pub fn delete_prompt(&self) -> Option<DeletePrompt> {
        if self.phase != ModalPhase::Preview {
            return None;
        }
        let id = self.current_id?;
        self.entity.as_ref()?;
        Some(DeletePrompt {
            id,
            title: format!("Delete {}", E::LABEL),
            message: format!(
                "Are you sure you want to delete this {}? This action cannot be undone.",
                E::RESOURCE
            ),
        })
    }

    /// Issue the DELETE once the user confirmed. `id` must still be on screen
    /// in preview; a refresh or save in flight blocks it.
    pub fn delete(&mut self, id: i64) -> Option<Pending> {
        if self.current_id != Some(id) || self.phase != ModalPhase::Preview {
            return None;
        }
        self.mutation = Some(Mutation::Delete);
        Some(self.issue(ApiRequest::delete(endpoints::entity(E::RESOURCE, id))))
    }

    pub fn finish_delete(&mut self, token: u64, result: Result<()>) -> Step {
        if !self.is_current(token) || self.mutation != Some(Mutation::Delete) {
            return Step::stale();
        }
        self.mutation = None;
        let id = self.current_id;

        match result {
            Ok(()) => {
                self.close();
                Step {
                    notice: Some(Notice::success(format!("{} deleted successfully!", E::LABEL))),
                    removed: id,
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id = ?id, error = %e, "failed to delete entity");
                Step::notice(Notice::error(e.user_message(&format!("Error deleting {}", E::RESOURCE))))
            }
        }
    }

    /// Close button, backdrop click or Escape. Any unsaved edit is dropped.
    pub fn close(&mut self) {
        self.reset();
        self.generation += 1;
    }

    fn reset(&mut self) {
        self.phase = ModalPhase::Closed;
        self.current_id = None;
        self.entity = None;
        self.draft.clear();
        self.open_in_edit = false;
        self.mutation = None;
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn view(&self) -> ModalView {
        match (self.phase, self.entity.is_some()) {
            (ModalPhase::Closed, _) | (_, false) => ModalView::Hidden,
            (ModalPhase::Editing | ModalPhase::Saving, true) => ModalView::Edit,
            (ModalPhase::Loading | ModalPhase::Preview, true) => ModalView::Preview,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.view() != ModalView::Hidden
    }

    /// Refresh in flight while a snapshot is shown.
    pub fn is_refreshing(&self) -> bool {
        self.phase == ModalPhase::Loading && self.entity.is_some()
    }

    pub fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn draft(&self) -> &FormFields {
        &self.draft
    }

    pub fn field(&self, name: &str) -> String {
        self.draft.get(name).cloned().unwrap_or_default()
    }

    pub fn title(&self) -> String {
        match self.view() {
            ModalView::Edit => format!("Edit {}", E::LABEL),
            _ => E::PREVIEW_TITLE.to_string(),
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.phase == ModalPhase::Saving
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_disabled() {
            "Saving..."
        } else {
            "Save Changes"
        }
    }
}

impl EntityModal<Job> {
    /// Flip active/closed on the server; the preview is refetched afterwards.
    pub fn toggle_status(&mut self) -> Option<Pending> {
        if self.phase != ModalPhase::Preview {
            return None;
        }
        let id = self.current_id?;
        self.mutation = Some(Mutation::ToggleStatus);
        Some(self.issue(ApiRequest::post(endpoints::job_toggle_status(id))))
    }

    pub fn finish_toggle(&mut self, token: u64, result: Result<MutationResponse>) -> Step {
        if !self.is_current(token) || self.mutation != Some(Mutation::ToggleStatus) {
            return Step::stale();
        }
        self.mutation = None;
        let Some(id) = self.current_id else {
            return Step::stale();
        };

        match result {
            Ok(resp) => {
                let status = resp.status;
                let message = match status {
                    Some(status) => format!("Job status updated to {}", status.as_str()),
                    None => resp.message.unwrap_or_else(|| "Job status updated".to_string()),
                };
                // refetch only while the preview is showing; an open edit form keeps its draft
                let next = if self.phase == ModalPhase::Preview {
                    Some(self.open(id))
                } else {
                    if let Some(status) = status {
                        if let Some(job) = self.entity.as_mut() {
                            job.status = status;
                        }
                        self.draft.insert("status".to_string(), status.as_str().to_string());
                    }
                    None
                };
                Step {
                    notice: Some(Notice::success(message)),
                    next,
                    changed: Some(id),
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(id, error = %e, "failed to toggle job status");
                Step::notice(Notice::error(e.user_message("Error updating job status")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::error::Error;
    use crate::types::JobStatus;

    fn job(id: i64, title: &str) -> Job {
        Job {
            id,
            title: title.to_string(),
            company: "Acme".to_string(),
            status: JobStatus::Active,
            ..Default::default()
        }
    }

    fn server_error() -> Error {
        Error::Http { status: 500, message: None }
    }

    #[test]
    fn test_open_issues_get_and_stays_hidden() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(4);

        assert_eq!(pending.request.method, Method::Get);
        assert_eq!(pending.request.path, "/api/job/4");
        assert_eq!(modal.phase(), ModalPhase::Loading);
        assert_eq!(modal.view(), ModalView::Hidden);
        assert_eq!(modal.current_id(), Some(4));
    }

    #[test]
    fn test_load_success_shows_preview_and_prefills_form() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(4);
        let step = modal.finish_load(pending.token, Ok(job(4, "Designer")));

        assert_eq!(step, Step { refreshed: Some(4), ..Default::default() });
        assert_eq!(modal.view(), ModalView::Preview);
        assert_eq!(modal.entity().map(|j| j.title.as_str()), Some("Designer"));
        assert_eq!(modal.field("title"), "Designer");
        assert_eq!(modal.field("status"), "active");
        assert_eq!(modal.title(), "Job Preview");
    }

    #[test]
    fn test_load_failure_leaves_modal_closed() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(4);
        let step = modal.finish_load(pending.token, Err(server_error()));

        assert_eq!(step.notice, Some(Notice::error("Error loading job details")));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert_eq!(modal.current_id(), None);
    }

    #[test]
    fn test_candidate_load_failure_message() {
        let mut modal = EntityModal::<Candidate>::new();
        let pending = modal.open(2);
        let step = modal.finish_load(pending.token, Err(Error::Transport("offline".into())));
        assert_eq!(step.notice, Some(Notice::error("Error loading candidate profile")));
    }

    #[test]
    fn test_open_for_edit() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open_for_edit(9);
        modal.finish_load(pending.token, Ok(job(9, "Analyst")));
        assert_eq!(modal.view(), ModalView::Edit);
        assert_eq!(modal.title(), "Edit Job");
    }

    #[test]
    fn test_edit_requires_preview() {
        let mut modal = EntityModal::<Job>::new();
        assert!(!modal.edit());
        modal.open(1);
        assert!(!modal.edit());
    }

    #[test]
    fn test_set_field_ignored_outside_editing() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(1);
        modal.finish_load(pending.token, Ok(job(1, "Original")));
        modal.set_field("title", "Changed");
        assert_eq!(modal.field("title"), "Original");
    }

    #[test]
    fn test_save_puts_draft() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(1);
        modal.finish_load(pending.token, Ok(job(1, "Original")));
        modal.edit();
        modal.set_field("title", "Renamed");

        let save = modal.save().expect("save should issue a request");
        assert_eq!(save.request.method, Method::Put);
        assert_eq!(save.request.path, "/api/job/1");
        match &save.request.body {
            crate::api::Body::Json(map) => assert_eq!(map.get("title").map(String::as_str), Some("Renamed")),
            other => panic!("unexpected body: {:?}", other),
        }
        assert!(modal.submit_disabled());
        assert_eq!(modal.submit_label(), "Saving...");
        assert!(modal.save().is_none());
    }

    #[test]
    fn test_delete_prompt_text() {
        let mut modal = EntityModal::<Candidate>::new();
        assert!(modal.delete_prompt().is_none());
        let pending = modal.open(3);
        modal.finish_load(pending.token, Ok(Candidate { id: 3, name: "Ann".into(), ..Default::default() }));

        let prompt = modal.delete_prompt().expect("prompt expected");
        assert_eq!(prompt.id, 3);
        assert_eq!(prompt.title, "Delete Candidate");
        assert_eq!(
            prompt.message,
            "Are you sure you want to delete this candidate? This action cannot be undone."
        );
    }

    #[test]
    fn test_delete_for_other_id_is_ignored() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(1);
        modal.finish_load(pending.token, Ok(job(1, "A")));
        assert!(modal.delete(2).is_none());
    }

    #[test]
    fn test_toggle_status_refetches() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(6);
        modal.finish_load(pending.token, Ok(job(6, "Ops")));

        let toggle = modal.toggle_status().expect("toggle expected");
        assert_eq!(toggle.request.method, Method::Post);
        assert_eq!(toggle.request.path, "/api/job/6/toggle-status");

        let resp = MutationResponse { success: true, status: Some(JobStatus::Closed), ..Default::default() };
        let step = modal.finish_toggle(toggle.token, Ok(resp));
        assert_eq!(step.notice, Some(Notice::success("Job status updated to closed")));
        let next = step.next.expect("refetch expected");
        assert_eq!(next.request, ApiRequest::get("/api/job/6"));
        assert_eq!(step.changed, Some(6));
    }

    #[test]
    fn test_toggle_answer_during_edit_keeps_draft() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(6);
        modal.finish_load(pending.token, Ok(job(6, "Ops")));
        let toggle = modal.toggle_status().expect("toggle expected");

        assert!(modal.edit());
        modal.set_field("title", "Site Reliability");

        let resp = MutationResponse { success: true, status: Some(JobStatus::Closed), ..Default::default() };
        let step = modal.finish_toggle(toggle.token, Ok(resp));
        assert!(step.next.is_none());
        assert_eq!(step.changed, Some(6));
        assert_eq!(modal.phase(), ModalPhase::Editing);
        assert_eq!(modal.field("title"), "Site Reliability");
        assert_eq!(modal.field("status"), "closed");
        assert_eq!(modal.entity().map(|j| j.status), Some(JobStatus::Closed));
    }

    #[test]
    fn test_delete_requires_preview() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(4);
        assert!(modal.delete(4).is_none());

        modal.finish_load(pending.token, Ok(job(4, "QA")));
        modal.edit();
        assert!(modal.delete_prompt().is_none());
        assert!(modal.delete(4).is_none());

        modal.cancel_edit();
        assert!(modal.is_refreshing());
        assert!(modal.delete(4).is_none());
    }

    #[test]
    fn test_toggle_status_failure_keeps_preview() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(6);
        modal.finish_load(pending.token, Ok(job(6, "Ops")));
        let toggle = modal.toggle_status().expect("toggle expected");

        let step = modal.finish_toggle(toggle.token, Err(server_error()));
        assert_eq!(step.notice, Some(Notice::error("Error updating job status")));
        assert!(step.next.is_none());
        assert_eq!(modal.view(), ModalView::Preview);
        assert_eq!(modal.entity().map(|j| j.status), Some(JobStatus::Active));
    }

    #[test]
    fn test_refresh_after_save_patches_list_row() {
        let mut modal = EntityModal::<Candidate>::new();
        let pending = modal.open(2);
        let loaded = Candidate { id: 2, name: "Ann".to_string(), ..Default::default() };
        modal.finish_load(pending.token, Ok(loaded.clone()));
        modal.edit();
        modal.set_field("name", "Ann Lee");
        let save = modal.save().unwrap();
        let step = modal.finish_save(save.token, Ok(()));
        let refresh = step.next.unwrap();

        let saved = Candidate { name: "Ann Lee".to_string(), ..loaded.clone() };
        let step = modal.finish_load(refresh.token, Ok(saved.clone()));
        assert_eq!(step.refreshed, Some(2));

        let mut rows = vec![
            Candidate { id: 1, name: "Bo".to_string(), ..Default::default() },
            loaded,
        ];
        assert!(replace_entity(&mut rows, modal.entity().unwrap()));
        assert_eq!(rows[1].name, "Ann Lee");
        assert_eq!(rows[0].name, "Bo");

        let other = Candidate { id: 9, ..saved };
        assert!(!replace_entity(&mut rows, &other));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_close_clears_everything() {
        let mut modal = EntityModal::<Job>::new();
        let pending = modal.open(1);
        modal.finish_load(pending.token, Ok(job(1, "A")));
        modal.edit();
        modal.close();

        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert_eq!(modal.current_id(), None);
        assert!(modal.entity().is_none());
        assert!(modal.draft().is_empty());
    }
}
