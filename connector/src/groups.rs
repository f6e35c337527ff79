/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use entity::group::Group;
use entity::user::ListItem;
use serde::Deserialize;
use serde_json::json;

const FIND_ALL_GROUPS: &str = "\
query FindAllGroups {
  findAllGroups {
    id
    name
    availableForProjects
    coordinator { id name }
    students { id name }
    projects { id name }
  }
}";

const SAVE_GROUP: &str = "\
mutation SaveGroup($name: String!, $coordinator: ID!, $students: [ID!]!) {
  saveGroup(name: $name, coordinator: $coordinator, students: $students) {
    id
    name
    availableForProjects
    coordinator { id name }
    students { id name }
    projects { id name }
  }
}";

const UPDATE_GROUP_AVAILABILITY: &str = "\
mutation UpdateGroupAvailability($id: ID!, $availableForProjects: Boolean!) {
  updateGroup(id: $id, availableForProjects: $availableForProjects) {
    id availableForProjects
  }
}";

const GROUP_ADD_STUDENT: &str = "\
mutation GroupAddStudent($groupId: ID!, $studentEmail: String!) {
  groupAddStudent(groupId: $groupId, studentEmail: $studentEmail) {
    id
    students { id name }
  }
}";

const GROUP_REMOVE_STUDENT: &str = "\
mutation GroupRemoveStudent($groupId: ID!, $studentId: ID!) {
  groupRemoveStudent(groupId: $groupId, studentId: $studentId) {
    id
    students { id name }
  }
}";

/// Partial projection of `updateGroup`: availability only.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupAvailabilityPayload {
    pub id: String,
    #[serde(rename = "availableForProjects")]
    pub available_for_projects: bool,
}

/// Partial projection of the membership mutations: the roster only.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupStudentsPayload {
    pub id: String,
    pub students: Vec<ListItem>,
}

pub async fn find_all(config: &RequestConfig) -> Result<OperationOutcome<Vec<Group>>, RequestError> {
    execute(config, "FindAllGroups", FIND_ALL_GROUPS, json!({}), "findAllGroups").await
}

pub async fn save(
    config: &RequestConfig,
    name: &str,
    coordinator_id: &str,
    student_ids: &[String],
) -> Result<OperationOutcome<Group>, RequestError> {
    execute(
        config,
        "SaveGroup",
        SAVE_GROUP,
        json!({
            "name": name,
            "coordinator": coordinator_id,
            "students": student_ids,
        }),
        "saveGroup",
    )
    .await
}

pub async fn update_availability(
    config: &RequestConfig,
    id: &str,
    available_for_projects: bool,
) -> Result<OperationOutcome<GroupAvailabilityPayload>, RequestError> {
    execute(
        config,
        "UpdateGroupAvailability",
        UPDATE_GROUP_AVAILABILITY,
        json!({
            "id": id,
            "availableForProjects": available_for_projects,
        }),
        "updateGroup",
    )
    .await
}

pub async fn add_student(
    config: &RequestConfig,
    group_id: &str,
    student_email: &str,
) -> Result<OperationOutcome<GroupStudentsPayload>, RequestError> {
    execute(
        config,
        "GroupAddStudent",
        GROUP_ADD_STUDENT,
        json!({
            "groupId": group_id,
            "studentEmail": student_email,
        }),
        "groupAddStudent",
    )
    .await
}

pub async fn remove_student(
    config: &RequestConfig,
    group_id: &str,
    student_id: &str,
) -> Result<OperationOutcome<GroupStudentsPayload>, RequestError> {
    execute(
        config,
        "GroupRemoveStudent",
        GROUP_REMOVE_STUDENT,
        json!({
            "groupId": group_id,
            "studentId": student_id,
        }),
        "groupRemoveStudent",
    )
    .await
}
