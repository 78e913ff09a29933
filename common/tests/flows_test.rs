//! Listing, application and notification flows

use careersync_common::api::parse_json;
use careersync_common::apply::{
    ApplicationForm, ApplyDecision, ApplyForm, ApplyGate, JobIdSet, ResumeFile, Session,
};
use careersync_common::config::ClientConfig;
use careersync_common::error::{Error, ValidationError};
use careersync_common::filter::{count_label, ListFilter, ListRow, SortKey};
use careersync_common::notify::{NotificationKind, Notifier};
use careersync_common::search::{JobSearch, SearchState, SearchView};
use careersync_common::types::{Job, JobSearchResponse, MutationResponse, UserRole};

const DASHBOARD_JOBS: &str = r#"[
    {"id": 1, "title": "Senior Software Engineer", "company": "Tech Corp", "status": "active", "created_at": "2024-01-15 10:00:00", "applications": 42},
    {"id": 2, "title": "UX Designer", "company": "Design Studio", "status": "active", "created_at": "2024-01-10 10:00:00", "applications": 28},
    {"id": 3, "title": "Data Engineer", "company": "Analytics Pro", "status": "closed", "created_at": "2024-01-05 10:00:00", "applications": 35},
    {"id": 4, "title": "DevOps Engineer", "company": "Cloud Systems", "status": "active", "created_at": "2023-12-28 10:00:00", "applications": 22},
    {"id": 5, "title": "Platform ENGINEER", "company": "Infra Inc", "status": "active", "created_at": "2023-12-20 10:00:00", "applications": 51}
]"#;

fn seeker() -> Session {
    Session { logged_in: true, user_type: UserRole::Jobseeker }
}

fn form_with_resume(size: u64, name: &str, mime: &str) -> ApplicationForm {
    ApplicationForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        resume: Some(ResumeFile { name: name.to_string(), size, mime: mime.to_string() }),
        ..Default::default()
    }
}

/// "engineer" + active + applications: matching rows, descending by count
#[test]
fn test_filter_engineer_active_by_applications() {
    let jobs: Vec<Job> = parse_json(DASHBOARD_JOBS).expect("jobs should parse");
    let rows: Vec<ListRow> = jobs.iter().map(ListRow::from_job).collect();

    let filter = ListFilter {
        query: "engineer".to_string(),
        status: "active".to_string(),
        sort: SortKey::Applications,
    };
    let result = filter.apply(&rows);
    let ids: Vec<i64> = result.visible.iter().map(|&i| rows[i].id).collect();

    assert_eq!(ids, vec![5, 1, 4]);
    assert_eq!(count_label(result.count(), "job"), "3 jobs found");
    assert_eq!(result.hidden.len(), 2);
}

/// 6 MB PDF rejected before any request; 2 MB docx accepted
#[test]
fn test_resume_size_gate() {
    let config = ClientConfig::default();
    let mut modal = ApplyForm::new();
    modal.open(9);

    modal.form = form_with_resume(6 * 1024 * 1024, "cv.pdf", "application/pdf");
    let err = modal.submit(&config.resume_rules()).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::ResumeTooLarge(5))));
    assert_eq!(err.user_message("unused"), "Resume file size must be less than 5MB");
    assert!(!modal.is_submitting());

    modal.form = form_with_resume(
        2 * 1024 * 1024,
        "cv.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    );
    let pending = modal.submit(&config.resume_rules()).expect("docx should pass");
    assert_eq!(pending.request.path, "/apply/9");
}

/// Second application for the same job is stopped with an info toast
#[test]
fn test_applying_twice() {
    let gate = ApplyGate::default();
    let mut applied = JobIdSet::default();
    let mut modal = ApplyForm::new();

    let ApplyDecision::OpenForm(job_id) = gate.check(&seeker(), &applied, 9) else {
        panic!("first attempt should open the form");
    };
    modal.open(job_id);
    modal.form = form_with_resume(1024, "cv.pdf", "application/pdf");
    let pending = modal.submit(&ClientConfig::default().resume_rules()).expect("valid form");
    let outcome = modal.finish_submit(
        pending.token,
        Ok(MutationResponse { success: true, ..Default::default() }),
        &mut applied,
    );
    assert_eq!(outcome.applied, Some(9));

    match gate.check(&seeker(), &applied, 9) {
        ApplyDecision::AlreadyApplied(notice) => {
            assert_eq!(notice.kind, NotificationKind::Info);
            assert_eq!(notice.message, "You have already applied for this job");
        }
        other => panic!("unexpected decision: {:?}", other),
    }
}

/// Toast stays until its own timer fires; older timers are ignored
#[test]
fn test_toast_timing() {
    let mut toast = Notifier::new();
    let short = toast.show("Saved", NotificationKind::Info);
    let long = toast.show("Job deleted successfully!", NotificationKind::Success);
    assert!(toast.is_visible());

    // the earlier, shorter timer elapses first
    toast.expire(short);
    assert!(toast.is_visible());
    assert_eq!(toast.message(), "Job deleted successfully!");

    toast.expire(long);
    assert!(!toast.is_visible());
}

/// Server-backed search: tags, request and results
#[test]
fn test_server_search_round() {
    let mut search = JobSearch::default();
    search.search = "engineer".to_string();
    search.location = "Remote".to_string();

    let mut state = SearchState::default();
    let pending = state.begin(&search);
    assert_eq!(pending.request.path, "/api/jobs?search=engineer&location=Remote");

    let body = format!(r#"{{"jobs": {}, "count": 5}}"#, DASHBOARD_JOBS);
    let resp: JobSearchResponse = parse_json(&body).expect("response should parse");
    state.finish(pending.token, Ok(resp));
    assert!(matches!(state.view(), SearchView::Results { count: 5, .. }));

    let labels: Vec<String> = search.active_tags().into_iter().map(|t| t.label).collect();
    assert_eq!(labels, vec!["Location: Remote", "Search: \"engineer\""]);
}
