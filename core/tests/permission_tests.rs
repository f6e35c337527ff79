/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the role-scoped view resolver

extern crate core as atrium_core;
use atrium_core::permission::*;
use atrium_core::types::EntityKind;
use entity::group::Group;
use entity::identity::Identity;
use entity::role::Role;
use entity::user::ListItem;
use strum::IntoEnumIterator;

fn identity(id: &str, role: Role) -> Identity {
    Identity {
        id: id.to_string(),
        name: "Someone".to_string(),
        email: "someone@example.edu".to_string(),
        role,
        affiliated_school: None,
    }
}

fn group_coordinated_by(coordinator_id: &str) -> Group {
    Group {
        id: "g1".to_string(),
        name: "Equipe Alfa".to_string(),
        available_for_projects: true,
        coordinator: Some(ListItem {
            id: coordinator_id.to_string(),
            name: "Ana Silva".to_string(),
        }),
        students: Vec::new(),
        projects: Vec::new(),
    }
}

#[test]
fn test_nav_items_per_role() {
    assert_eq!(
        visible_nav_items(Some(Role::Admin)),
        vec![NavItem::Teams, NavItem::Projects, NavItem::Users]
    );
    assert_eq!(
        visible_nav_items(Some(Role::Professor)),
        vec![NavItem::MyTeams, NavItem::MyProjects]
    );
    assert_eq!(visible_nav_items(Some(Role::Student)), vec![NavItem::MyTeams]);
}

#[test]
fn test_nav_items_fail_closed() {
    assert!(visible_nav_items(None).is_empty());
    // An unrecognized wire role parses to None and therefore sees
    // nothing.
    assert!(visible_nav_items(Role::parse("SUPERVISOR")).is_empty());
}

#[test]
fn test_nav_items_deterministic() {
    for role in Role::iter() {
        assert_eq!(visible_nav_items(Some(role)), visible_nav_items(Some(role)));
    }
}

#[test]
fn test_only_admin_edits_users() {
    assert!(can_edit(Role::Admin, EntityKind::User));
    assert!(!can_edit(Role::Professor, EntityKind::User));
    assert!(!can_edit(Role::Student, EntityKind::User));
}

#[test]
fn test_students_are_read_only() {
    for kind in [EntityKind::User, EntityKind::Group, EntityKind::Project] {
        assert!(!can_edit(Role::Student, kind));
        assert!(!can_delete(Role::Student, kind));
    }
}

#[test]
fn test_delete_is_admin_only() {
    for kind in [EntityKind::User, EntityKind::Group, EntityKind::Project] {
        assert!(can_delete(Role::Admin, kind));
        assert!(!can_delete(Role::Professor, kind));
    }
}

#[test]
fn test_toggle_availability() {
    let group = group_coordinated_by("3");

    assert!(can_toggle_availability(&identity("1", Role::Admin), &group));
    assert!(can_toggle_availability(&identity("3", Role::Professor), &group));

    // A professor who does not coordinate this group may not toggle it.
    assert!(!can_toggle_availability(&identity("4", Role::Professor), &group));
    assert!(!can_toggle_availability(&identity("3", Role::Student), &group));
}

#[test]
fn test_toggle_availability_without_coordinator() {
    let mut group = group_coordinated_by("3");
    group.coordinator = None;

    assert!(can_toggle_availability(&identity("1", Role::Admin), &group));
    assert!(!can_toggle_availability(&identity("3", Role::Professor), &group));
}

#[test]
fn test_request_project() {
    assert!(can_request_project(Role::Student));
    assert!(can_request_project(Role::Professor));
    assert!(!can_request_project(Role::Admin));
}
