/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use entity::identity::Identity;
use serde::Deserialize;
use serde_json::json;

const LOGIN: &str = "\
mutation Login($email: String!, $password: String!) {
  login(email: $email, password: $password) {
    token
    user { id name email role affiliatedSchool }
  }
}";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: Identity,
}

pub async fn login(
    config: &RequestConfig,
    email: &str,
    password: &str,
) -> Result<OperationOutcome<LoginPayload>, RequestError> {
    execute(
        config,
        "Login",
        LOGIN,
        json!({ "email": email, "password": password }),
        "login",
    )
    .await
}
