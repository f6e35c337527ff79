/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::group::Group;
use entity::identity::Identity;
use entity::role::Role;
use strum_macros::EnumIter;

use super::types::EntityKind;

/// Navigation surfaces the client knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum NavItem {
    Teams,
    Projects,
    Users,
    MyTeams,
    MyProjects,
}

impl NavItem {
    pub fn title(&self) -> &'static str {
        match self {
            NavItem::Teams => "Teams",
            NavItem::Projects => "Projects",
            NavItem::Users => "Users",
            NavItem::MyTeams => "My Teams",
            NavItem::MyProjects => "My Projects",
        }
    }
}

/// Fixed navigation table per role. A missing or unrecognized role sees
/// nothing: permissions fail closed, not open.
pub fn visible_nav_items(role: Option<Role>) -> Vec<NavItem> {
    match role {
        Some(Role::Admin) => vec![NavItem::Teams, NavItem::Projects, NavItem::Users],
        Some(Role::Professor) => vec![NavItem::MyTeams, NavItem::MyProjects],
        Some(Role::Student) => vec![NavItem::MyTeams],
        None => Vec::new(),
    }
}

/// Whether a role may edit records of the given kind at all. Only
/// admins touch user accounts; students are read-only everywhere.
pub fn can_edit(role: Role, kind: EntityKind) -> bool {
    match (role, kind) {
        (Role::Admin, _) => true,
        (Role::Professor, EntityKind::Group | EntityKind::Project) => true,
        (Role::Professor, EntityKind::User) => false,
        (Role::Student, _) => false,
    }
}

pub fn can_delete(role: Role, kind: EntityKind) -> bool {
    matches!((role, kind), (Role::Admin, _))
}

/// Availability is toggled by an admin, or by the professor who
/// coordinates that particular group.
pub fn can_toggle_availability(identity: &Identity, group: &Group) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Professor => group
            .coordinator
            .as_ref()
            .is_some_and(|coordinator| coordinator.id == identity.id),
        Role::Student => false,
    }
}

/// Project requests originate from students and professors.
pub fn can_request_project(role: Role) -> bool {
    matches!(role, Role::Student | Role::Professor)
}
