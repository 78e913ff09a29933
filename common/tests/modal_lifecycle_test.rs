//! Entity modal lifecycle tests
//!
//! Drives the modal through open / edit / save / delete the way the page
//! does: each pending request is answered by hand.

use careersync_common::api::{parse_response, Method};
use careersync_common::confirm::ConfirmDialog;
use careersync_common::error::Error;
use careersync_common::modal::{EntityModal, ModalPhase, ModalView, Notice};
use careersync_common::notify::{NotificationKind, Notifier};
use careersync_common::types::{Candidate, Job};

const JOB_JSON: &str = r#"{
    "id": 7,
    "title": "Senior Software Engineer",
    "company": "Tech Corp",
    "location": "Remote",
    "job_type": "fulltime",
    "description": "Build services",
    "requirements": "Rust, SQL",
    "status": "active",
    "created_at": "2024-01-15 09:30:00",
    "applications": 42
}"#;

fn loaded_job_modal() -> EntityModal<Job> {
    let mut modal = EntityModal::new();
    let pending = modal.open(7);
    let job = parse_response::<Job>(200, JOB_JSON).expect("job should parse");
    modal.finish_load(pending.token, Ok(job));
    modal
}

/// Preview shows the fetched snapshot only after the response arrives
#[test]
fn test_preview_appears_after_fetch() {
    let mut modal = EntityModal::<Job>::new();
    let pending = modal.open(7);
    assert_eq!(modal.view(), ModalView::Hidden);

    let job = parse_response::<Job>(200, JOB_JSON).expect("job should parse");
    modal.finish_load(pending.token, Ok(job));

    let shown = modal.entity().expect("entity should be shown");
    assert_eq!(shown.title, "Senior Software Engineer");
    assert_eq!(shown.company, "Tech Corp");
    assert_eq!(shown.status.as_str(), "active");
}

/// Edit is local; leaving it issues exactly one GET for the same id
#[test]
fn test_edit_is_offline_and_cancel_refetches_once() {
    let mut modal = loaded_job_modal();
    assert!(modal.edit());
    assert_eq!(modal.view(), ModalView::Edit);

    let refresh = modal.cancel_edit().expect("cancel should refetch");
    assert_eq!(refresh.request.method, Method::Get);
    assert_eq!(refresh.request.path, "/api/job/7");
    assert!(modal.is_refreshing());
}

/// Save with a 200: one success toast, back in preview, list reload requested
#[test]
fn test_save_success() {
    let mut modal = loaded_job_modal();
    let mut toast = Notifier::new();
    modal.edit();
    modal.set_field("title", "Staff Engineer");

    let save = modal.save().expect("save should issue PUT");
    assert_eq!(save.request.method, Method::Put);

    let step = modal.finish_save(save.token, Ok(()));
    let notice = step.notice.expect("success notice");
    toast.show(notice.message, notice.kind);
    assert_eq!(toast.message(), "Job updated successfully!");
    assert_eq!(toast.kind(), NotificationKind::Success);
    assert_eq!(step.changed, Some(7));

    let refresh = step.next.expect("refresh after save");
    assert_eq!(refresh.request.path, "/api/job/7");
    assert!(!modal.submit_disabled());

    let updated = Job { id: 7, title: "Staff Engineer".to_string(), ..Default::default() };
    modal.finish_load(refresh.token, Ok(updated));
    assert_eq!(modal.phase(), ModalPhase::Preview);
}

/// Save with a non-2xx: one error toast, still editing, edits preserved
#[test]
fn test_save_failure_keeps_draft() {
    let mut modal = loaded_job_modal();
    modal.edit();
    modal.set_field("title", "Typo-free title");
    let save = modal.save().expect("save should issue PUT");

    let err = parse_response::<()>(422, r#"{"error": "Title too long"}"#).unwrap_err();
    let step = modal.finish_save(save.token, Err(err));

    assert_eq!(step.notice, Some(Notice::error("Title too long")));
    assert!(step.next.is_none());
    assert_eq!(modal.phase(), ModalPhase::Editing);
    assert!(!modal.submit_disabled());
    assert_eq!(modal.field("title"), "Typo-free title");
}

/// Generic fallback when the server body has no message
#[test]
fn test_candidate_save_failure_fallback() {
    let mut modal = EntityModal::<Candidate>::new();
    let pending = modal.open(3);
    modal.finish_load(pending.token, Ok(Candidate { id: 3, name: "Ann Lee".into(), ..Default::default() }));
    modal.edit();
    let save = modal.save().expect("save should issue PUT");

    let step = modal.finish_save(save.token, Err(Error::Http { status: 500, message: None }));
    assert_eq!(step.notice, Some(Notice::error("Error updating candidate")));
}

/// Delete goes through the confirmation dialog and closes the modal
#[test]
fn test_confirmed_delete_closes_modal() {
    let mut modal = loaded_job_modal();
    let mut confirm = ConfirmDialog::new();

    let prompt = modal.delete_prompt().expect("prompt");
    confirm.open(prompt.title, prompt.message, prompt.id);
    let id = confirm.accept().expect("confirmed action");

    let pending = modal.delete(id).expect("delete should issue request");
    assert_eq!(pending.request.method, Method::Delete);

    let step = modal.finish_delete(pending.token, Ok(()));
    assert_eq!(step.notice, Some(Notice::success("Job deleted successfully!")));
    assert_eq!(step.removed, Some(7));
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert_eq!(modal.current_id(), None);
}

/// Failed delete leaves the modal on screen
#[test]
fn test_delete_failure_keeps_modal_open() {
    let mut modal = loaded_job_modal();
    let pending = modal.delete(7).expect("delete should issue request");
    let step = modal.finish_delete(pending.token, Err(Error::Transport("offline".into())));

    assert_eq!(step.notice, Some(Notice::error("Error deleting job")));
    assert!(modal.is_visible());
}

/// Cancelled confirmation never reaches the network
#[test]
fn test_cancelled_delete_issues_nothing() {
    let modal = loaded_job_modal();
    let mut confirm = ConfirmDialog::new();
    let prompt = modal.delete_prompt().expect("prompt");
    confirm.open(prompt.title, prompt.message, prompt.id);
    confirm.cancel();
    assert!(confirm.accept().is_none());
}

/// Rapidly opening two previews: the older response must not win
#[test]
fn test_stale_response_after_reopen() {
    let mut modal = EntityModal::<Job>::new();
    let first = modal.open(1);
    let second = modal.open(2);

    let step = modal.finish_load(first.token, Ok(Job { id: 1, title: "Old".into(), ..Default::default() }));
    assert!(step.stale);
    assert_eq!(modal.view(), ModalView::Hidden);

    modal.finish_load(second.token, Ok(Job { id: 2, title: "New".into(), ..Default::default() }));
    assert_eq!(modal.entity().map(|j| j.title.as_str()), Some("New"));
}

/// Closing while a request is in flight discards its response
#[test]
fn test_close_discards_in_flight() {
    let mut modal = EntityModal::<Job>::new();
    let pending = modal.open(1);
    modal.close();

    let step = modal.finish_load(pending.token, Ok(Job { id: 1, ..Default::default() }));
    assert!(step.stale);
    assert_eq!(modal.phase(), ModalPhase::Closed);
}

/// Status toggle refetches and reports the new status
#[test]
fn test_toggle_status_round() {
    let mut modal = loaded_job_modal();
    let pending = modal.toggle_status().expect("toggle should issue POST");
    assert_eq!(pending.request.path, "/api/job/7/toggle-status");

    let resp = parse_response(200, r#"{"success": true, "status": "closed"}"#).expect("parse");
    let step = modal.finish_toggle(pending.token, Ok(resp));
    assert_eq!(step.notice, Some(Notice::success("Job status updated to closed")));
    assert!(step.next.is_some());
}

/// A failed delete leaves a usable preview: refresh first, then delete
#[test]
fn test_failed_delete_after_refresh_leaves_preview_usable() {
    let mut modal = loaded_job_modal();
    modal.edit();
    let refresh = modal.cancel_edit().expect("cancel should refetch");

    // Delete is refused while the refresh is in flight
    assert!(modal.delete_prompt().is_none());
    assert!(modal.delete(7).is_none());

    let job = parse_response::<Job>(200, JOB_JSON).expect("job should parse");
    let step = modal.finish_load(refresh.token, Ok(job));
    assert!(!step.stale);
    assert_eq!(modal.phase(), ModalPhase::Preview);

    let pending = modal.delete(7).expect("delete from preview");
    let forbidden = Error::Http { status: 403, message: Some("Forbidden".into()) };
    let step = modal.finish_delete(pending.token, Err(forbidden));
    assert_eq!(step.notice, Some(Notice::error("Forbidden")));

    assert_eq!(modal.phase(), ModalPhase::Preview);
    assert!(!modal.is_refreshing());
    assert!(modal.toggle_status().is_some());
    assert!(modal.edit());
}
