/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use entity::group::GroupRef;
use entity::project::{Project, ProjectStatus};
use serde::Deserialize;
use serde_json::json;

const FIND_ALL_PROJECTS: &str = "\
query FindAllProjects {
  findAllProjects {
    id
    name
    objective
    summaryScope
    targetAudience
    expectedStartDate
    status
    requester { id name }
    group { id name coordinator { id name } }
  }
}";

const SAVE_PROJECT: &str = "\
mutation SaveProject($name: String!, $objective: String!, $requester: ID!, $summaryScope: String!, $targetAudience: String!, $expectedStartDate: String!) {
  saveProject(name: $name, objective: $objective, requester: $requester, summaryScope: $summaryScope, targetAudience: $targetAudience, expectedStartDate: $expectedStartDate) {
    id
    name
    objective
    summaryScope
    targetAudience
    expectedStartDate
    status
    requester { id name }
    group { id name coordinator { id name } }
  }
}";

const UPDATE_PROJECT: &str = "\
mutation UpdateProject($id: ID!, $name: String!, $objective: String!, $summaryScope: String!, $targetAudience: String!, $expectedStartDate: String!, $status: ProjectStatus!) {
  updateProject(id: $id, name: $name, objective: $objective, summaryScope: $summaryScope, targetAudience: $targetAudience, expectedStartDate: $expectedStartDate, status: $status) {
    id
    name
    objective
    summaryScope
    targetAudience
    expectedStartDate
    status
    requester { id name }
    group { id name coordinator { id name } }
  }
}";

const ASSIGN_PROJECT_TO_GROUP: &str = "\
mutation AssignProjectToGroup($groupId: ID!, $projectId: ID!) {
  assignProjectToGroup(groupId: $groupId, projectId: $projectId) {
    id
    name
    group { id name coordinator { id name } }
  }
}";

/// Partial projection of `assignProjectToGroup`: the project side of the
/// relation only. The group's own project list is not returned and must
/// be invalidated by the caller rather than guessed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectGroupPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<GroupRef>,
}

pub async fn find_all(
    config: &RequestConfig,
) -> Result<OperationOutcome<Vec<Project>>, RequestError> {
    execute(
        config,
        "FindAllProjects",
        FIND_ALL_PROJECTS,
        json!({}),
        "findAllProjects",
    )
    .await
}

/// `expected_start_date` must already be normalized to `YYYY-MM-DD`;
/// the orchestrator rejects anything else before building the payload.
pub async fn save(
    config: &RequestConfig,
    name: &str,
    objective: &str,
    requester_id: &str,
    summary_scope: &str,
    target_audience: &str,
    expected_start_date: &str,
) -> Result<OperationOutcome<Project>, RequestError> {
    execute(
        config,
        "SaveProject",
        SAVE_PROJECT,
        json!({
            "name": name,
            "objective": objective,
            "requester": requester_id,
            "summaryScope": summary_scope,
            "targetAudience": target_audience,
            "expectedStartDate": expected_start_date,
        }),
        "saveProject",
    )
    .await
}

pub async fn update(
    config: &RequestConfig,
    id: &str,
    name: &str,
    objective: &str,
    summary_scope: &str,
    target_audience: &str,
    expected_start_date: &str,
    status: ProjectStatus,
) -> Result<OperationOutcome<Project>, RequestError> {
    execute(
        config,
        "UpdateProject",
        UPDATE_PROJECT,
        json!({
            "id": id,
            "name": name,
            "objective": objective,
            "summaryScope": summary_scope,
            "targetAudience": target_audience,
            "expectedStartDate": expected_start_date,
            "status": status,
        }),
        "updateProject",
    )
    .await
}

pub async fn assign_to_group(
    config: &RequestConfig,
    group_id: &str,
    project_id: &str,
) -> Result<OperationOutcome<ProjectGroupPayload>, RequestError> {
    execute(
        config,
        "AssignProjectToGroup",
        ASSIGN_PROJECT_TO_GROUP,
        json!({
            "groupId": group_id,
            "projectId": project_id,
        }),
        "assignProjectToGroup",
    )
    .await
}
