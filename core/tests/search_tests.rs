/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for list filtering

extern crate core as atrium_core;
use atrium_core::search::filter;
use chrono::NaiveDate;
use entity::group::{Group, GroupRef};
use entity::project::{Project, ProjectStatus};
use entity::role::Role;
use entity::user::{ListItem, User};

fn user(name: &str, email: &str) -> User {
    User {
        id: name.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Student,
        affiliated_school: None,
    }
}

fn group(name: &str, coordinator: &str, project: Option<&str>) -> Group {
    Group {
        id: name.to_string(),
        name: name.to_string(),
        available_for_projects: true,
        coordinator: Some(ListItem {
            id: format!("c-{}", coordinator),
            name: coordinator.to_string(),
        }),
        students: Vec::new(),
        projects: project
            .map(|p| {
                vec![ListItem {
                    id: format!("p-{}", p),
                    name: p.to_string(),
                }]
            })
            .unwrap_or_default(),
    }
}

fn project(name: &str, objective: &str, audience: &str) -> Project {
    Project {
        id: name.to_string(),
        name: name.to_string(),
        objective: objective.to_string(),
        summary_scope: "scope".to_string(),
        target_audience: audience.to_string(),
        expected_start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        status: ProjectStatus::PendingAnalysis,
        requester: None,
        group: Some(GroupRef {
            id: "g1".to_string(),
            name: "Equipe Alfa".to_string(),
            coordinator: Some(ListItem {
                id: "c1".to_string(),
                name: "Ana Silva".to_string(),
            }),
        }),
    }
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let groups = vec![group("Equipe Alfa", "Ana Silva", None)];

    assert_eq!(filter(&groups, "EQUIPE").len(), 1);
    assert_eq!(filter(&groups, "alfa").len(), 1);
    assert_eq!(filter(&groups, "ipe al").len(), 1);
    assert!(filter(&groups, "zzz").is_empty());
}

#[test]
fn test_empty_query_is_identity() {
    let users = vec![user("Ana", "ana@x.com"), user("Lucas", "lucas@x.com")];

    assert_eq!(filter(&users, ""), users);
    assert_eq!(filter(&users, "   "), users);
}

#[test]
fn test_user_fields() {
    let users = vec![user("Ana Silva", "ana.silva@school.edu")];

    assert_eq!(filter(&users, "silva").len(), 1);
    assert_eq!(filter(&users, "school.edu").len(), 1);
    assert!(filter(&users, "professor").is_empty());
}

#[test]
fn test_group_searches_coordinator_and_projects() {
    let groups = vec![
        group("Equipe Alfa", "Ana Silva", Some("Monitoring App")),
        group("Equipe Beta", "Carlos Souza", None),
    ];

    let hits = filter(&groups, "ana");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Equipe Alfa");

    let hits = filter(&groups, "monitoring");
    assert_eq!(hits.len(), 1);

    assert_eq!(filter(&groups, "equipe").len(), 2);
}

#[test]
fn test_project_searches_all_indexed_fields() {
    let projects = vec![project(
        "School Portal",
        "Digitize enrollment",
        "School staff",
    )];

    for query in ["portal", "enrollment", "staff", "equipe alfa", "ana silva", "scope"] {
        assert_eq!(filter(&projects, query).len(), 1, "query {:?}", query);
    }

    assert!(filter(&projects, "unrelated").is_empty());
}
