/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use connector::{OperationOutcome, RequestConfig, RequestError};
use atrium_core::consts::DUPLICATE_SUBMISSION_WINDOW;
use atrium_core::error::{ClientError, ClientResult};
use atrium_core::input::{check_name, normalize_date, validate_email};
use atrium_core::notify::Notification;
use atrium_core::types::{ClientState, EntityKind};
use entity::group::Group;
use entity::identity::{Identity, IdentityPatch};
use entity::project::{Project, ProjectStatus};
use entity::role::Role;
use entity::user::User;
use uuid::Uuid;

use crate::api::Api;

/// Transient flags owned by the surface that initiated a write: a
/// submit-in-progress flag (disables the submit button) and whether
/// the initiating dialog is open. A failed write leaves the dialog
/// open so the user can retry or cancel; only success closes it.
#[derive(Default)]
pub struct SubmitState {
    submitting: AtomicBool,
    dialog_open: AtomicBool,
}

impl SubmitState {
    pub fn new() -> Self {
        SubmitState::default()
    }

    pub fn open_dialog(&self) {
        self.dialog_open.store(true, Ordering::SeqCst);
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open.load(Ordering::SeqCst)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    fn begin(&self) {
        self.submitting.store(true, Ordering::SeqCst);
    }

    fn settle(&self, success: bool) {
        self.submitting.store(false, Ordering::SeqCst);
        if success {
            self.dialog_open.store(false, Ordering::SeqCst);
        }
    }
}

/// A project request as entered in the request form. The start date is
/// kept in whatever representation the form produced; it is normalized
/// to `YYYY-MM-DD` here before anything is sent.
#[derive(Clone, Debug)]
pub struct ProjectDraft {
    pub submission_id: Uuid,
    pub name: String,
    pub objective: String,
    pub summary_scope: String,
    pub target_audience: String,
    pub expected_start_date: String,
}

#[derive(Clone, Debug)]
pub struct ProjectUpdate {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub summary_scope: String,
    pub target_audience: String,
    pub expected_start_date: String,
    pub status: ProjectStatus,
}

/// Uniform lifecycle around every write: dispatch, reconcile the cache
/// on success, report through the notification channel, reset the
/// caller's transient flags. A failing write never touches the cache.
///
/// Create operations carry a client-generated submission id; repeating
/// an id inside [`DUPLICATE_SUBMISSION_WINDOW`] is dropped locally
/// instead of re-sent. A failed attempt releases its id so the retry
/// the open dialog invites is not blocked.
pub struct MutationOrchestrator {
    state: Arc<ClientState>,
    api: Arc<dyn Api>,
    submissions: Mutex<HashMap<Uuid, Instant>>,
}

impl MutationOrchestrator {
    pub fn new(state: Arc<ClientState>, api: Arc<dyn Api>) -> Self {
        MutationOrchestrator {
            state,
            api,
            submissions: Mutex::new(HashMap::new()),
        }
    }

    pub fn state(&self) -> &Arc<ClientState> {
        &self.state
    }

    fn config(&self) -> RequestConfig {
        RequestConfig {
            endpoint: self.state.endpoint.clone(),
            token: self.state.session.token(),
        }
    }

    // --- session ---

    /// Authenticates and installs the session. Whatever session was
    /// persisted before is dropped first, so a failed login cannot
    /// leave the previous account reachable.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Identity> {
        self.state.session.logout();
        self.state.cache.write().expect("cache lock").clear();

        let result = match self.api.login(&self.config(), email, password).await {
            Err(err) => Err(ClientError::Auth(err.to_string())),
            Ok(outcome) => {
                let message = outcome.error_message();
                match outcome.data {
                    Some(payload) => {
                        self.state.session.login(payload.user.clone(), payload.token);
                        Ok(payload.user)
                    }
                    None => Err(ClientError::Auth(
                        message.unwrap_or_else(|| "Invalid credentials".to_string()),
                    )),
                }
            }
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "login failed");
            self.state
                .notifier
                .emit(Notification::failure("Sign-in failed", err.message()));
        }

        result
    }

    /// Clears the session and every cached record, so nothing leaks
    /// into the next login on this device.
    pub fn logout(&self) {
        self.state.session.logout();
        self.state.cache.write().expect("cache lock").clear();
    }

    // --- queries ---

    /// Refetches the user list into the cache. Under the all-errors
    /// policy partial data still lands in the cache; the error is
    /// surfaced alongside it rather than instead of it.
    pub async fn refresh_users(&self) -> ClientResult<Vec<User>> {
        let outcome = self.api.find_all_users(&self.config()).await;
        self.apply_list(outcome, |cache, users: Vec<User>| cache.replace_users(users))
            .map(|_| self.state.cache.read().expect("cache lock").users())
    }

    pub async fn refresh_groups(&self) -> ClientResult<Vec<Group>> {
        let outcome = self.api.find_all_groups(&self.config()).await;
        self.apply_list(outcome, |cache, groups: Vec<Group>| {
            cache.replace_groups(groups)
        })
        .map(|_| self.state.cache.read().expect("cache lock").groups())
    }

    pub async fn refresh_projects(&self) -> ClientResult<Vec<Project>> {
        let outcome = self.api.find_all_projects(&self.config()).await;
        self.apply_list(outcome, |cache, projects: Vec<Project>| {
            cache.replace_projects(projects)
        })
        .map(|_| self.state.cache.read().expect("cache lock").projects())
    }

    fn apply_list<T, F>(
        &self,
        outcome: Result<OperationOutcome<Vec<T>>, RequestError>,
        apply: F,
    ) -> ClientResult<()>
    where
        F: FnOnce(&mut atrium_core::cache::EntityCache, Vec<T>),
    {
        match outcome {
            Err(err) => Err(ClientError::Query(err.to_string())),
            Ok(outcome) => {
                let message = outcome.error_message();
                match outcome.data {
                    Some(records) => {
                        apply(
                            &mut self.state.cache.write().expect("cache lock"),
                            records,
                        );
                        match message {
                            Some(message) => Err(ClientError::Query(message)),
                            None => Ok(()),
                        }
                    }
                    None => Err(ClientError::Query(
                        message.unwrap_or_else(|| "The server returned no data".to_string()),
                    )),
                }
            }
        }
    }

    // --- users ---

    pub async fn create_user(
        &self,
        submit: &SubmitState,
        submission_id: Uuid,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> ClientResult<User> {
        submit.begin();

        if let Err(err) = self.register_submission(submission_id) {
            return self.finish(submit, "User created", "Could not create user", Err(err));
        }

        let result = self
            .try_create_user(name, email, password, role)
            .await;
        if result.is_err() {
            self.release_submission(submission_id);
        }

        self.finish(submit, "User created", "Could not create user", result)
    }

    async fn try_create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> ClientResult<User> {
        check_name(name).map_err(ClientError::Validation)?;
        validate_email(email).map_err(ClientError::Validation)?;

        let outcome = self
            .api
            .save_user(&self.config(), name, email, password, role)
            .await;
        let user = mutation_data(outcome)?;

        self.state
            .cache
            .write()
            .expect("cache lock")
            .upsert_user(user.clone());
        Ok(user)
    }

    /// Updates a user record. When the edited account is the signed-in
    /// one, the session identity is reconciled with the informational
    /// fields of the response; its id and role stay as they are.
    pub async fn update_user(
        &self,
        submit: &SubmitState,
        id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
        affiliated_school: Option<&str>,
    ) -> ClientResult<User> {
        submit.begin();

        let result = self
            .try_update_user(id, name, email, password, affiliated_school)
            .await;
        self.finish(submit, "User updated", "Could not update user", result)
    }

    async fn try_update_user(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
        affiliated_school: Option<&str>,
    ) -> ClientResult<User> {
        check_name(name).map_err(ClientError::Validation)?;
        validate_email(email).map_err(ClientError::Validation)?;

        let outcome = self
            .api
            .update_user(&self.config(), id, name, email, password, affiliated_school)
            .await;
        let user = mutation_data(outcome)?;

        self.state
            .cache
            .write()
            .expect("cache lock")
            .upsert_user(user.clone());

        let is_self = self
            .state
            .session
            .get_identity()
            .is_some_and(|identity| identity.id == user.id);
        if is_self {
            self.state.session.update_identity(IdentityPatch {
                name: Some(user.name.clone()),
                email: Some(user.email.clone()),
                affiliated_school: user.affiliated_school.clone(),
            });
        }

        Ok(user)
    }

    pub async fn delete_user(&self, submit: &SubmitState, id: &str) -> ClientResult<User> {
        submit.begin();

        let outcome = self.api.delete_user(&self.config(), id).await;
        let result = mutation_data(outcome).map(|user: User| {
            self.state.cache.write().expect("cache lock").remove_user(id);
            user
        });

        self.finish(submit, "User deleted", "Could not delete user", result)
    }

    // --- groups ---

    pub async fn create_group(
        &self,
        submit: &SubmitState,
        submission_id: Uuid,
        name: &str,
        coordinator_id: &str,
        student_ids: &[String],
    ) -> ClientResult<Group> {
        submit.begin();

        if let Err(err) = self.register_submission(submission_id) {
            return self.finish(submit, "Team created", "Could not create team", Err(err));
        }

        let result = self
            .try_create_group(name, coordinator_id, student_ids)
            .await;
        if result.is_err() {
            self.release_submission(submission_id);
        }

        self.finish(submit, "Team created", "Could not create team", result)
    }

    async fn try_create_group(
        &self,
        name: &str,
        coordinator_id: &str,
        student_ids: &[String],
    ) -> ClientResult<Group> {
        check_name(name).map_err(ClientError::Validation)?;
        if coordinator_id.is_empty() {
            return Err(ClientError::Validation(
                "A coordinator must be selected".to_string(),
            ));
        }

        let outcome = self
            .api
            .save_group(&self.config(), name, coordinator_id, student_ids)
            .await;
        let group = mutation_data(outcome)?;

        self.state
            .cache
            .write()
            .expect("cache lock")
            .upsert_group(group.clone());
        Ok(group)
    }

    /// Toggles whether the group may be offered as an assignment
    /// target. The response is a partial projection, so only the
    /// availability field is patched; everything else stays cached.
    pub async fn set_group_availability(
        &self,
        submit: &SubmitState,
        id: &str,
        available_for_projects: bool,
    ) -> ClientResult<bool> {
        submit.begin();

        let outcome = self
            .api
            .update_group_availability(&self.config(), id, available_for_projects)
            .await;
        let result = mutation_data(outcome).map(|payload| {
            let mut cache = self.state.cache.write().expect("cache lock");
            if !cache.set_group_availability(&payload.id, payload.available_for_projects) {
                cache.invalidate(EntityKind::Group, Some(&payload.id));
            }
            payload.available_for_projects
        });

        self.finish(
            submit,
            "Team availability updated",
            "Could not update team availability",
            result,
        )
    }

    pub async fn add_student_to_group(
        &self,
        submit: &SubmitState,
        group_id: &str,
        student_email: &str,
    ) -> ClientResult<()> {
        submit.begin();

        let result = match validate_email(student_email).map_err(ClientError::Validation) {
            Err(err) => Err(err),
            Ok(()) => {
                let outcome = self
                    .api
                    .group_add_student(&self.config(), group_id, student_email)
                    .await;
                mutation_data(outcome).map(|payload| self.apply_roster(payload))
            }
        };

        self.finish(submit, "Student added", "Could not add student", result)
    }

    pub async fn remove_student_from_group(
        &self,
        submit: &SubmitState,
        group_id: &str,
        student_id: &str,
    ) -> ClientResult<()> {
        submit.begin();

        let outcome = self
            .api
            .group_remove_student(&self.config(), group_id, student_id)
            .await;
        let result = mutation_data(outcome).map(|payload| self.apply_roster(payload));

        self.finish(submit, "Student removed", "Could not remove student", result)
    }

    /// Applies a roster payload to its group and marks every other
    /// cached group stale: a membership change may have pulled the
    /// student out of a roster the response does not mention.
    fn apply_roster(&self, payload: connector::groups::GroupStudentsPayload) {
        let mut cache = self.state.cache.write().expect("cache lock");

        let others: Vec<String> = cache
            .groups()
            .into_iter()
            .map(|group| group.id)
            .filter(|id| *id != payload.id)
            .collect();
        for id in &others {
            cache.invalidate(EntityKind::Group, Some(id));
        }

        if !cache.set_group_students(&payload.id, payload.students) {
            cache.invalidate(EntityKind::Group, Some(&payload.id));
        }
    }

    // --- projects ---

    /// Submits a project request on behalf of the signed-in user.
    pub async fn create_project(
        &self,
        submit: &SubmitState,
        draft: ProjectDraft,
    ) -> ClientResult<Project> {
        submit.begin();

        if let Err(err) = self.register_submission(draft.submission_id) {
            return self.finish(
                submit,
                "Project requested",
                "Could not request project",
                Err(err),
            );
        }

        let result = self.try_create_project(&draft).await;
        if result.is_err() {
            self.release_submission(draft.submission_id);
        }

        self.finish(submit, "Project requested", "Could not request project", result)
    }

    async fn try_create_project(&self, draft: &ProjectDraft) -> ClientResult<Project> {
        let requester = self
            .state
            .session
            .get_identity()
            .ok_or_else(ClientError::not_authenticated)?;

        check_name(&draft.name).map_err(ClientError::Validation)?;
        let start_date =
            normalize_date(&draft.expected_start_date).map_err(ClientError::Validation)?;

        let outcome = self
            .api
            .save_project(
                &self.config(),
                &draft.name,
                &draft.objective,
                &requester.id,
                &draft.summary_scope,
                &draft.target_audience,
                &start_date,
            )
            .await;
        let project = mutation_data(outcome)?;

        self.state
            .cache
            .write()
            .expect("cache lock")
            .upsert_project(project.clone());
        Ok(project)
    }

    pub async fn update_project(
        &self,
        submit: &SubmitState,
        update: ProjectUpdate,
    ) -> ClientResult<Project> {
        submit.begin();

        let result = self.try_update_project(&update).await;
        self.finish(submit, "Project updated", "Could not update project", result)
    }

    async fn try_update_project(&self, update: &ProjectUpdate) -> ClientResult<Project> {
        check_name(&update.name).map_err(ClientError::Validation)?;
        let start_date =
            normalize_date(&update.expected_start_date).map_err(ClientError::Validation)?;

        let outcome = self
            .api
            .update_project(
                &self.config(),
                &update.id,
                &update.name,
                &update.objective,
                &update.summary_scope,
                &update.target_audience,
                &start_date,
                update.status,
            )
            .await;
        let project = mutation_data(outcome)?;

        self.state
            .cache
            .write()
            .expect("cache lock")
            .upsert_project(project.clone());
        Ok(project)
    }

    /// Assigns a project to a group. A group cached as unavailable is
    /// rejected locally. The response confirms the project side only,
    /// so the cache links both sides from the known ids and the group
    /// record is marked stale instead of guessed at.
    pub async fn assign_project_to_group(
        &self,
        submit: &SubmitState,
        group_id: &str,
        project_id: &str,
    ) -> ClientResult<()> {
        submit.begin();

        let result = self.try_assign_project(group_id, project_id).await;
        self.finish(
            submit,
            "Project assigned",
            "Could not assign project",
            result,
        )
    }

    async fn try_assign_project(&self, group_id: &str, project_id: &str) -> ClientResult<()> {
        {
            let cache = self.state.cache.read().expect("cache lock");
            if let Some(group) = cache.group(group_id) {
                if !group.available_for_projects {
                    return Err(ClientError::group_unavailable(&group.name));
                }
            }
        }

        let outcome = self
            .api
            .assign_project_to_group(&self.config(), group_id, project_id)
            .await;
        let payload = mutation_data(outcome)?;

        let mut cache = self.state.cache.write().expect("cache lock");
        if !cache.assign_project_to_group(&payload.id, group_id) {
            cache.invalidate(EntityKind::Project, Some(&payload.id));
        }
        cache.invalidate(EntityKind::Group, Some(group_id));

        Ok(())
    }

    // --- lifecycle plumbing ---

    fn register_submission(&self, id: Uuid) -> ClientResult<()> {
        let mut submissions = self.submissions.lock().expect("submission lock");
        let now = Instant::now();
        submissions.retain(|_, at| now.duration_since(*at) < DUPLICATE_SUBMISSION_WINDOW);

        if submissions.contains_key(&id) {
            tracing::info!(submission_id = %id, "duplicate submission dropped");
            return Err(ClientError::duplicate_submission());
        }

        submissions.insert(id, now);
        Ok(())
    }

    fn release_submission(&self, id: Uuid) {
        self.submissions
            .lock()
            .expect("submission lock")
            .remove(&id);
    }

    fn finish<T>(
        &self,
        submit: &SubmitState,
        success_title: &str,
        failure_title: &str,
        result: ClientResult<T>,
    ) -> ClientResult<T> {
        match &result {
            Ok(_) => {
                submit.settle(true);
                self.state.notifier.emit(Notification::success(success_title));
            }
            Err(err) => {
                submit.settle(false);
                tracing::warn!(error = %err, "{}", failure_title);
                self.state
                    .notifier
                    .emit(Notification::failure(failure_title, err.message()));
            }
        }

        result
    }
}

/// Lifts a mutation outcome into the client taxonomy. A returned root
/// field means the mutation committed and is canonical for every field
/// it includes; errors without one are a failure carrying the server's
/// message when it sent any.
fn mutation_data<T>(outcome: Result<OperationOutcome<T>, RequestError>) -> ClientResult<T> {
    match outcome {
        Err(err) => Err(ClientError::Mutation(err.to_string())),
        Ok(outcome) => {
            let message = outcome.error_message();
            match outcome.data {
                Some(data) => Ok(data),
                None => Err(ClientError::Mutation(
                    message.unwrap_or_else(|| "The server returned no result".to_string()),
                )),
            }
        }
    }
}
