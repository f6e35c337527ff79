/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use super::group::GroupRef;
use super::user::ListItem;

/// Lifecycle of a project request. The server is the authority on legal
/// transitions; the client sets whatever an editor picks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    PendingAnalysis,
    UnderAnalysis,
    Rejected,
    InProgress,
    Finished,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::PendingAnalysis => "PENDING_ANALYSIS",
            ProjectStatus::UnderAnalysis => "UNDER_ANALYSIS",
            ProjectStatus::Rejected => "REJECTED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Finished => "FINISHED",
        }
    }

    /// Human-readable label used by list views.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::PendingAnalysis => "Pending analysis",
            ProjectStatus::UnderAnalysis => "Under analysis",
            ProjectStatus::Rejected => "Rejected",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Finished => "Finished",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work requested by a user, optionally assigned to a group.
/// `expected_start_date` carries no time component and is transmitted
/// as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub summary_scope: String,
    pub target_audience: String,
    pub expected_start_date: NaiveDate,
    pub status: ProjectStatus,
    #[serde(default)]
    pub requester: Option<ListItem>,
    #[serde(default)]
    pub group: Option<GroupRef>,
}
