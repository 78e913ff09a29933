//! Application context: reactive state plus the actions that drive it
//!
//! Every action follows the same shape: a state machine from
//! `careersync_common` hands out a `Pending` request, the request runs on
//! `spawn_local`, and the outcome is fed back into the same state machine.

use careersync_common::apply::{ApplyDecision, JobDetails, ResumeFile};
use careersync_common::modal::{replace_entity, DeletePrompt, Notice, Step};
use careersync_common::types::{ApplicationList, JobSearchResponse, MutationResponse};
use careersync_common::{
    ApplicationsPanel, ApplyForm, Candidate, ClientConfig, ConfirmDialog, Entity, EntityModal, Job,
    JobId, JobIdSet, JobList, JobSearch, ModalView, Notifier, Page, PageData, Pending, SavedJobs,
    SearchState, Session, Shortcut,
};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info};
use web_sys::File;

use crate::api::ApiClient;
use crate::bootstrap::navigate;
use crate::storage::{load_ids, store_ids, APPLIED_JOBS_KEY, SAVED_JOBS_KEY};

/// Deferred action held by the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteJob(JobId),
    DeleteCandidate(i64),
    /// Delete straight from a row of the job table
    DeleteJobRow(JobId),
}

#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<ClientConfig>,
    pub session: StoredValue<Session>,
    pub page: Page,
    pub toast: RwSignal<Notifier>,
    pub confirm: RwSignal<ConfirmDialog<ConfirmAction>>,
    pub job_modal: RwSignal<EntityModal<Job>>,
    pub candidate_modal: RwSignal<EntityModal<Candidate>>,
    pub job_list: RwSignal<JobList>,
    pub candidates: RwSignal<Vec<Candidate>>,
    pub applications: RwSignal<ApplicationsPanel>,
    pub apply_form: RwSignal<ApplyForm>,
    pub saved: RwSignal<SavedJobs>,
    pub applied: RwSignal<JobIdSet>,
    pub details: RwSignal<JobDetails>,
    pub search: RwSignal<JobSearch>,
    pub search_state: RwSignal<SearchState>,
    /// Server-rendered listing shown before the first search
    pub initial_jobs: StoredValue<Vec<Job>>,
    pub post_job_open: RwSignal<bool>,
    debounce: RwSignal<u64>,
}

/// Entity kinds the preview modals can show, with the list each one
/// keeps in sync.
pub trait ModalEntity: Entity + Send + Sync + 'static {
    fn modal(ctx: &AppContext) -> RwSignal<EntityModal<Self>>;
    fn delete_action(id: i64) -> ConfirmAction;
    fn changed(ctx: &AppContext, id: i64);
    fn removed(ctx: &AppContext, id: i64);
    /// A fresh snapshot arrived in the modal.
    fn refreshed(ctx: &AppContext, entity: &Self);
}

impl ModalEntity for Job {
    fn modal(ctx: &AppContext) -> RwSignal<EntityModal<Self>> {
        ctx.job_modal
    }

    fn delete_action(id: i64) -> ConfirmAction {
        ConfirmAction::DeleteJob(id)
    }

    fn changed(ctx: &AppContext, _id: i64) {
        if ctx.page == Page::Dashboard {
            ctx.reload_jobs();
        }
    }

    fn removed(ctx: &AppContext, id: i64) {
        ctx.job_list.update(|list| list.remove(id));
    }

    // the dashboard table reloads through `changed`
    fn refreshed(_ctx: &AppContext, _entity: &Self) {}
}

impl ModalEntity for Candidate {
    fn modal(ctx: &AppContext) -> RwSignal<EntityModal<Self>> {
        ctx.candidate_modal
    }

    fn delete_action(id: i64) -> ConfirmAction {
        ConfirmAction::DeleteCandidate(id)
    }

    fn changed(ctx: &AppContext, _id: i64) {
        ctx.refresh_applications();
    }

    fn removed(ctx: &AppContext, id: i64) {
        ctx.candidates.update(|list| list.retain(|c| c.id != id));
        ctx.refresh_applications();
    }

    fn refreshed(ctx: &AppContext, entity: &Self) {
        let stale = ctx
            .candidates
            .with_untracked(|rows| rows.iter().any(|row| row.id == entity.id && row != entity));
        if stale {
            ctx.candidates.update(|rows| {
                replace_entity(rows, entity);
            });
        }
    }
}

impl AppContext {
    pub fn new(config: ClientConfig, page: PageData) -> Self {
        let mut saved = page.saved_job_ids;
        saved.merge(&load_ids(SAVED_JOBS_KEY));
        let mut applied = page.applied_job_ids;
        applied.merge(&load_ids(APPLIED_JOBS_KEY));

        Self {
            config: StoredValue::new(config),
            session: StoredValue::new(page.session),
            page: page.page,
            toast: RwSignal::new(Notifier::new()),
            confirm: RwSignal::new(ConfirmDialog::new()),
            job_modal: RwSignal::new(EntityModal::new()),
            candidate_modal: RwSignal::new(EntityModal::new()),
            job_list: RwSignal::new(JobList::new(page.jobs.clone())),
            candidates: RwSignal::new(page.candidates),
            applications: RwSignal::new(ApplicationsPanel::new()),
            apply_form: RwSignal::new(ApplyForm::new()),
            saved: RwSignal::new(SavedJobs::new(saved)),
            applied: RwSignal::new(applied),
            details: RwSignal::new(JobDetails::default()),
            search: RwSignal::new(JobSearch::default()),
            search_state: RwSignal::new(SearchState::default()),
            initial_jobs: StoredValue::new(page.jobs),
            post_job_open: RwSignal::new(false),
            debounce: RwSignal::new(0),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.config.with_value(ApiClient::new)
    }

    // ---- notifications ----

    /// Show a toast and schedule its dismissal.
    pub fn notify(&self, notice: Notice) {
        let toast = self.toast;
        let Some(ticket) = toast.try_update(|t| t.show(notice.message, notice.kind)) else {
            return;
        };
        let timeout = self.config.with_value(|c| c.toast_timeout_ms);
        Timeout::new(timeout, move || {
            toast.try_update(|t| t.expire(ticket));
        })
        .forget();
    }

    // ---- confirmation ----

    pub fn ask(&self, prompt: DeletePrompt, action: ConfirmAction) {
        if let Some(dropped) = self.confirm.try_update(|c| c.open(prompt.title, prompt.message, action)).flatten() {
            debug!(?dropped, "previous confirmation discarded");
        }
    }

    pub fn accept_confirm(&self) {
        let Some(action) = self.confirm.try_update(|c| c.accept()).flatten() else {
            return;
        };
        match action {
            ConfirmAction::DeleteJob(id) => self.delete_entity::<Job>(id),
            ConfirmAction::DeleteCandidate(id) => self.delete_entity::<Candidate>(id),
            ConfirmAction::DeleteJobRow(id) => self.delete_row(id),
        }
    }

    pub fn cancel_confirm(&self) {
        self.confirm.update(|c| c.cancel());
    }

    // ---- entity modals ----

    pub fn open_entity<E: ModalEntity>(&self, id: i64) {
        let pending = E::modal(self).try_update(|m| m.open(id));
        if let Some(pending) = pending {
            self.load_entity::<E>(pending);
        }
    }

    pub fn open_entity_for_edit<E: ModalEntity>(&self, id: i64) {
        let pending = E::modal(self).try_update(|m| m.open_for_edit(id));
        if let Some(pending) = pending {
            self.load_entity::<E>(pending);
        }
    }

    pub fn cancel_edit<E: ModalEntity>(&self) {
        if let Some(pending) = E::modal(self).try_update(|m| m.cancel_edit()).flatten() {
            self.load_entity::<E>(pending);
        }
    }

    fn load_entity<E: ModalEntity>(&self, pending: Pending) {
        let ctx = *self;
        let modal = E::modal(self);
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<E>(&pending.request).await;
            if let Some(step) = modal.try_update(|m| m.finish_load(pending.token, result)) {
                ctx.apply_step::<E>(step);
            }
        });
    }

    pub fn save<E: ModalEntity>(&self) {
        let ctx = *self;
        let modal = E::modal(self);
        let Some(pending) = modal.try_update(|m| m.save()).flatten() else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_ok(&pending.request).await;
            if let Some(step) = modal.try_update(|m| m.finish_save(pending.token, result)) {
                ctx.apply_step::<E>(step);
            }
        });
    }

    pub fn request_delete<E: ModalEntity>(&self) {
        if let Some(prompt) = E::modal(self).with_untracked(|m| m.delete_prompt()) {
            let action = E::delete_action(prompt.id);
            self.ask(prompt, action);
        }
    }

    fn delete_entity<E: ModalEntity>(&self, id: i64) {
        let ctx = *self;
        let modal = E::modal(self);
        let Some(pending) = modal.try_update(|m| m.delete(id)).flatten() else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_ok(&pending.request).await;
            if let Some(step) = modal.try_update(|m| m.finish_delete(pending.token, result)) {
                ctx.apply_step::<E>(step);
            }
        });
    }

    pub fn toggle_job_status(&self) {
        let ctx = *self;
        let modal = self.job_modal;
        let Some(pending) = modal.try_update(|m| m.toggle_status()).flatten() else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<MutationResponse>(&pending.request).await;
            if let Some(step) = modal.try_update(|m| m.finish_toggle(pending.token, result)) {
                ctx.apply_step::<Job>(step);
            }
        });
    }

    fn apply_step<E: ModalEntity>(&self, step: Step) {
        if step.stale {
            return;
        }
        if let Some(notice) = step.notice {
            self.notify(notice);
        }
        if let Some(next) = step.next {
            self.load_entity::<E>(next);
        }
        if let Some(id) = step.changed {
            E::changed(self, id);
        }
        if let Some(id) = step.removed {
            E::removed(self, id);
        }
        if let Some(id) = step.refreshed {
            let entity = E::modal(self).with_untracked(|m| m.entity().filter(|e| e.id() == id).cloned());
            if let Some(entity) = entity {
                E::refreshed(self, &entity);
            }
        }
    }

    // ---- job table ----

    pub fn reload_jobs(&self) {
        let ctx = *self;
        let Some(pending) = self.job_list.try_update(|l| l.reload()) else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<JobSearchResponse>(&pending.request).await;
            if let Some(Some(notice)) = ctx.job_list.try_update(|l| l.finish_reload(pending.token, result)) {
                ctx.notify(notice);
            }
        });
    }

    pub fn request_row_delete(&self, id: JobId) {
        if let Some(prompt) = self.job_list.with_untracked(|l| l.delete_prompt(id)) {
            self.ask(prompt, ConfirmAction::DeleteJobRow(id));
        }
    }

    fn delete_row(&self, id: JobId) {
        let ctx = *self;
        let Some(pending) = self.job_list.try_update(|l| l.delete(id)).flatten() else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<MutationResponse>(&pending.request).await;
            if let Some(Some(notice)) = ctx.job_list.try_update(|l| l.finish_delete(id, pending.token, result)) {
                ctx.notify(notice);
            }
        });
    }

    // ---- applications panel ----

    pub fn open_applications(&self, job_id: JobId) {
        let ctx = *self;
        let panel = self.applications;
        let Some(pending) = panel.try_update(|p| p.open(job_id)) else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let job = client.fetch_json::<Job>(&pending.request).await;
            let Some(step) = panel.try_update(|p| p.finish_job(pending.token, job)) else {
                return;
            };
            if let Some(notice) = step.notice {
                ctx.notify(notice);
            }
            let Some(next) = step.next else { return };

            let list = client.fetch_json::<ApplicationList>(&next.request).await;
            let Some(step) = panel.try_update(|p| p.finish(next.token, list)) else {
                return;
            };
            if let Some(notice) = step.notice {
                ctx.notify(notice);
            }
            let Some(scores) = step.next else { return };

            let flat = client.fetch_json::<ApplicationList>(&scores.request).await;
            panel.try_update(|p| p.finish_scores(scores.token, flat));
        });
    }

    fn refresh_applications(&self) {
        if let Some(job_id) = self.applications.with_untracked(|p| p.job_id()) {
            let filter = self.applications.with_untracked(|p| p.filter.clone());
            self.open_applications(job_id);
            self.applications.update(|p| p.filter = filter);
        }
    }

    // ---- public job listing ----

    pub fn run_search(&self) {
        let ctx = *self;
        // supersede any debounced search still waiting
        self.debounce.update(|d| *d += 1);
        let query = self.search.get_untracked();
        let Some(pending) = self.search_state.try_update(|s| s.begin(&query)) else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<JobSearchResponse>(&pending.request).await;
            ctx.search_state.try_update(|s| s.finish(pending.token, result));
        });
    }

    /// Search after the input has been quiet for `search_debounce_ms`.
    pub fn search_debounced(&self) {
        let ctx = *self;
        let Some(ticket) = self.debounce.try_update(|d| {
            *d += 1;
            *d
        }) else {
            return;
        };
        let delay = self.config.with_value(|c| c.search_debounce_ms);
        Timeout::new(delay, move || {
            if ctx.debounce.try_get_untracked() == Some(ticket) {
                ctx.run_search();
            }
        })
        .forget();
    }

    pub fn open_details(&self, job_id: JobId) {
        let ctx = *self;
        let Some(pending) = self.details.try_update(|d| d.open(job_id)) else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_json::<Job>(&pending.request).await;
            ctx.details.try_update(|d| d.finish(pending.token, result));
        });
    }

    pub fn apply_for_job(&self, job_id: JobId) {
        let gate = self.config.with_value(|c| c.apply_gate());
        let decision = self
            .session
            .with_value(|session| self.applied.with_untracked(|applied| gate.check(session, applied, job_id)));

        match decision {
            ApplyDecision::RedirectToLogin(url) => navigate(&url),
            ApplyDecision::Reject(notice) | ApplyDecision::AlreadyApplied(notice) => self.notify(notice),
            ApplyDecision::OpenForm(id) => self.apply_form.update(|f| f.open(id)),
        }
    }

    pub fn submit_application(&self, file: Option<File>) {
        let ctx = *self;
        let resume = file.as_ref().map(|f| ResumeFile { name: f.name(), size: f.size() as u64, mime: f.type_() });
        let rules = self.config.with_value(|c| c.resume_rules());

        let submitted = self.apply_form.try_update(|f| {
            f.form.resume = resume;
            f.submit(&rules)
        });
        let pending = match submitted {
            Some(Ok(pending)) => pending,
            Some(Err(e)) => {
                self.notify(Notice::error(e.user_message("Error submitting application")));
                return;
            }
            None => return,
        };

        let client = self.client();
        spawn_local(async move {
            let result = client.upload::<MutationResponse>(&pending.request, file.as_ref()).await;
            let outcome = ctx.apply_form.try_update(|f| {
                ctx.applied.try_update(|applied| f.finish_submit(pending.token, result, applied))
            });
            let Some(Some(outcome)) = outcome else { return };

            if let Some(job_id) = outcome.applied {
                info!(job_id, "marked job as applied");
                ctx.applied.with_untracked(|ids| store_ids(APPLIED_JOBS_KEY, ids));
            }
            if let Some(notice) = outcome.notice {
                ctx.notify(notice);
            }
        });
    }

    pub fn toggle_saved(&self, job_id: JobId) {
        let ctx = *self;
        let Some(pending) = self.saved.try_update(|s| s.toggle(job_id)) else {
            return;
        };
        let client = self.client();
        spawn_local(async move {
            let result = client.fetch_ok(&pending.request).await;
            if let Some(Some(notice)) = ctx.saved.try_update(|s| s.finish(job_id, pending.token, result)) {
                ctx.saved.with_untracked(|s| store_ids(SAVED_JOBS_KEY, s.ids()));
                ctx.notify(notice);
            }
        });
    }

    // ---- keyboard ----

    pub fn close_all(&self) {
        self.job_modal.update(|m| m.close());
        self.candidate_modal.update(|m| m.close());
        self.confirm.update(|c| c.cancel());
        self.applications.update(|p| p.close());
        self.apply_form.update(|f| f.close());
        self.details.update(|d| d.close());
        self.post_job_open.set(false);
    }

    /// Returns whether the shortcut applied on this page.
    pub fn handle_shortcut(&self, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::CloseModals => {
                self.close_all();
                true
            }
            Shortcut::SaveForm => {
                let mut handled = false;
                if self.job_modal.with_untracked(|m| m.view()) == ModalView::Edit {
                    self.save::<Job>();
                    handled = true;
                }
                if self.candidate_modal.with_untracked(|m| m.view()) == ModalView::Edit {
                    self.save::<Candidate>();
                    handled = true;
                }
                handled
            }
            Shortcut::NewJob if self.page == Page::Dashboard => {
                self.post_job_open.set(true);
                true
            }
            Shortcut::NewJob => false,
        }
    }
}
