/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use async_trait::async_trait;
use connector::auth::LoginPayload;
use connector::groups::{GroupAvailabilityPayload, GroupStudentsPayload};
use connector::projects::ProjectGroupPayload;
use connector::{OperationOutcome, RequestConfig, RequestError};
use entity::group::Group;
use entity::project::{Project, ProjectStatus};
use entity::role::Role;
use entity::user::User;

pub type ApiResult<T> = Result<OperationOutcome<T>, RequestError>;

/// Seam over the GraphQL connector. The orchestrator talks to this
/// trait only, so tests can substitute a scripted implementation and
/// exercise the full write lifecycle without a server.
#[async_trait]
pub trait Api: Send + Sync {
    async fn login(
        &self,
        config: &RequestConfig,
        email: &str,
        password: &str,
    ) -> ApiResult<LoginPayload>;

    async fn find_all_users(&self, config: &RequestConfig) -> ApiResult<Vec<User>>;

    async fn save_user(
        &self,
        config: &RequestConfig,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> ApiResult<User>;

    async fn update_user(
        &self,
        config: &RequestConfig,
        id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
        affiliated_school: Option<&str>,
    ) -> ApiResult<User>;

    async fn delete_user(&self, config: &RequestConfig, id: &str) -> ApiResult<User>;

    async fn find_all_groups(&self, config: &RequestConfig) -> ApiResult<Vec<Group>>;

    async fn save_group(
        &self,
        config: &RequestConfig,
        name: &str,
        coordinator_id: &str,
        student_ids: &[String],
    ) -> ApiResult<Group>;

    async fn update_group_availability(
        &self,
        config: &RequestConfig,
        id: &str,
        available_for_projects: bool,
    ) -> ApiResult<GroupAvailabilityPayload>;

    async fn group_add_student(
        &self,
        config: &RequestConfig,
        group_id: &str,
        student_email: &str,
    ) -> ApiResult<GroupStudentsPayload>;

    async fn group_remove_student(
        &self,
        config: &RequestConfig,
        group_id: &str,
        student_id: &str,
    ) -> ApiResult<GroupStudentsPayload>;

    async fn find_all_projects(&self, config: &RequestConfig) -> ApiResult<Vec<Project>>;

    async fn save_project(
        &self,
        config: &RequestConfig,
        name: &str,
        objective: &str,
        requester_id: &str,
        summary_scope: &str,
        target_audience: &str,
        expected_start_date: &str,
    ) -> ApiResult<Project>;

    async fn update_project(
        &self,
        config: &RequestConfig,
        id: &str,
        name: &str,
        objective: &str,
        summary_scope: &str,
        target_audience: &str,
        expected_start_date: &str,
        status: ProjectStatus,
    ) -> ApiResult<Project>;

    async fn assign_project_to_group(
        &self,
        config: &RequestConfig,
        group_id: &str,
        project_id: &str,
    ) -> ApiResult<ProjectGroupPayload>;
}

/// Production implementation: forwards every operation to the
/// connector's named GraphQL documents.
pub struct HttpApi;

#[async_trait]
impl Api for HttpApi {
    async fn login(
        &self,
        config: &RequestConfig,
        email: &str,
        password: &str,
    ) -> ApiResult<LoginPayload> {
        connector::auth::login(config, email, password).await
    }

    async fn find_all_users(&self, config: &RequestConfig) -> ApiResult<Vec<User>> {
        connector::users::find_all(config).await
    }

    async fn save_user(
        &self,
        config: &RequestConfig,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> ApiResult<User> {
        connector::users::save(config, name, email, password, role).await
    }

    async fn update_user(
        &self,
        config: &RequestConfig,
        id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
        affiliated_school: Option<&str>,
    ) -> ApiResult<User> {
        connector::users::update(config, id, name, email, password, affiliated_school).await
    }

    async fn delete_user(&self, config: &RequestConfig, id: &str) -> ApiResult<User> {
        connector::users::delete(config, id).await
    }

    async fn find_all_groups(&self, config: &RequestConfig) -> ApiResult<Vec<Group>> {
        connector::groups::find_all(config).await
    }

    async fn save_group(
        &self,
        config: &RequestConfig,
        name: &str,
        coordinator_id: &str,
        student_ids: &[String],
    ) -> ApiResult<Group> {
        connector::groups::save(config, name, coordinator_id, student_ids).await
    }

    async fn update_group_availability(
        &self,
        config: &RequestConfig,
        id: &str,
        available_for_projects: bool,
    ) -> ApiResult<GroupAvailabilityPayload> {
        connector::groups::update_availability(config, id, available_for_projects).await
    }

    async fn group_add_student(
        &self,
        config: &RequestConfig,
        group_id: &str,
        student_email: &str,
    ) -> ApiResult<GroupStudentsPayload> {
        connector::groups::add_student(config, group_id, student_email).await
    }

    async fn group_remove_student(
        &self,
        config: &RequestConfig,
        group_id: &str,
        student_id: &str,
    ) -> ApiResult<GroupStudentsPayload> {
        connector::groups::remove_student(config, group_id, student_id).await
    }

    async fn find_all_projects(&self, config: &RequestConfig) -> ApiResult<Vec<Project>> {
        connector::projects::find_all(config).await
    }

    async fn save_project(
        &self,
        config: &RequestConfig,
        name: &str,
        objective: &str,
        requester_id: &str,
        summary_scope: &str,
        target_audience: &str,
        expected_start_date: &str,
    ) -> ApiResult<Project> {
        connector::projects::save(
            config,
            name,
            objective,
            requester_id,
            summary_scope,
            target_audience,
            expected_start_date,
        )
        .await
    }

    async fn update_project(
        &self,
        config: &RequestConfig,
        id: &str,
        name: &str,
        objective: &str,
        summary_scope: &str,
        target_audience: &str,
        expected_start_date: &str,
        status: ProjectStatus,
    ) -> ApiResult<Project> {
        connector::projects::update(
            config,
            id,
            name,
            objective,
            summary_scope,
            target_audience,
            expected_start_date,
            status,
        )
        .await
    }

    async fn assign_project_to_group(
        &self,
        config: &RequestConfig,
        group_id: &str,
        project_id: &str,
    ) -> ApiResult<ProjectGroupPayload> {
        connector::projects::assign_to_group(config, group_id, project_id).await
    }
}
