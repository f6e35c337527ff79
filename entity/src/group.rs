/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};

use super::user::ListItem;

/// A cohort of students under one coordinating professor. A group with
/// `available_for_projects == false` must not be offered as an
/// assignment target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub available_for_projects: bool,
    #[serde(default)]
    pub coordinator: Option<ListItem>,
    #[serde(default)]
    pub students: Vec<ListItem>,
    #[serde(default)]
    pub projects: Vec<ListItem>,
}

impl Group {
    /// The project list views surface as "the" group's project. The
    /// server allows several; only the first is treated as current.
    pub fn current_project(&self) -> Option<&ListItem> {
        self.projects.first()
    }
}

/// Group projection embedded in a project record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coordinator: Option<ListItem>,
}
