/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The authenticated account, as returned by the login mutation and
/// persisted across reloads. The role is fixed for the lifetime of a
/// session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliated_school: Option<String>,
}

/// Fields a profile edit may change. `id` and `role` are deliberately
/// not representable here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub affiliated_school: Option<String>,
}
