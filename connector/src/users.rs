/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use entity::role::Role;
use entity::user::User;
use serde_json::json;

const FIND_ALL_USERS: &str = "\
query FindAllUsers {
  findAllUsers { id name email role affiliatedSchool }
}";

const SAVE_USER: &str = "\
mutation SaveUser($email: String!, $name: String!, $password: String!, $role: UserRole!) {
  saveUser(email: $email, name: $name, password: $password, role: $role) {
    id name email role affiliatedSchool
  }
}";

const UPDATE_USER: &str = "\
mutation UpdateUser($id: ID!, $name: String!, $email: String!, $password: String, $affiliatedSchool: String) {
  updateUser(id: $id, name: $name, email: $email, password: $password, affiliatedSchool: $affiliatedSchool) {
    id name email role affiliatedSchool
  }
}";

const DELETE_USER: &str = "\
mutation DeleteUser($id: ID!) {
  deleteUser(id: $id) { id name email role }
}";

pub async fn find_all(config: &RequestConfig) -> Result<OperationOutcome<Vec<User>>, RequestError> {
    execute(config, "FindAllUsers", FIND_ALL_USERS, json!({}), "findAllUsers").await
}

pub async fn save(
    config: &RequestConfig,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<OperationOutcome<User>, RequestError> {
    execute(
        config,
        "SaveUser",
        SAVE_USER,
        json!({
            "name": name,
            "email": email,
            "password": password,
            "role": role,
        }),
        "saveUser",
    )
    .await
}

/// The password variable is only transmitted when a new one was
/// explicitly generated; `None` serializes to a null variable the
/// server treats as "leave unchanged".
pub async fn update(
    config: &RequestConfig,
    id: &str,
    name: &str,
    email: &str,
    password: Option<&str>,
    affiliated_school: Option<&str>,
) -> Result<OperationOutcome<User>, RequestError> {
    execute(
        config,
        "UpdateUser",
        UPDATE_USER,
        json!({
            "id": id,
            "name": name,
            "email": email,
            "password": password,
            "affiliatedSchool": affiliated_school,
        }),
        "updateUser",
    )
    .await
}

pub async fn delete(
    config: &RequestConfig,
    id: &str,
) -> Result<OperationOutcome<User>, RequestError> {
    execute(config, "DeleteUser", DELETE_USER, json!({ "id": id }), "deleteUser").await
}
