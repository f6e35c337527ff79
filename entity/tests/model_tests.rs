/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for entity serialization and accessors

use entity::group::Group;
use entity::identity::Identity;
use entity::project::{Project, ProjectStatus};
use entity::role::Role;

#[test]
fn test_identity_round_trip() {
    let raw = r#"{"id":"3","name":"Ana Silva","email":"ana@example.edu","role":"PROFESSOR","affiliatedSchool":"IFPR"}"#;
    let identity: Identity = serde_json::from_str(raw).unwrap();

    assert_eq!(identity.id, "3");
    assert_eq!(identity.role, Role::Professor);
    assert_eq!(identity.affiliated_school.as_deref(), Some("IFPR"));

    let serialized = serde_json::to_string(&identity).unwrap();
    let reparsed: Identity = serde_json::from_str(&serialized).unwrap();
    assert_eq!(reparsed, identity);
}

#[test]
fn test_identity_without_school() {
    let raw = r#"{"id":"9","name":"Lucas","email":"lucas@example.edu","role":"STUDENT"}"#;
    let identity: Identity = serde_json::from_str(raw).unwrap();

    assert_eq!(identity.affiliated_school, None);
    // Absent optional fields are not re-serialized as null.
    assert!(!serde_json::to_string(&identity).unwrap().contains("affiliatedSchool"));
}

#[test]
fn test_group_current_project() {
    let raw = r#"{
        "id": "g1",
        "name": "Equipe Alfa",
        "availableForProjects": true,
        "coordinator": {"id": "3", "name": "Ana Silva"},
        "students": [{"id": "9", "name": "Lucas"}],
        "projects": [
            {"id": "p1", "name": "School Management System"},
            {"id": "p2", "name": "Monitoring App"}
        ]
    }"#;
    let group: Group = serde_json::from_str(raw).unwrap();

    assert_eq!(group.current_project().map(|p| p.id.as_str()), Some("p1"));
    assert_eq!(group.projects.len(), 2);
}

#[test]
fn test_group_defaults_for_missing_relations() {
    let raw = r#"{"id":"g2","name":"Equipe Beta","availableForProjects":false}"#;
    let group: Group = serde_json::from_str(raw).unwrap();

    assert!(group.coordinator.is_none());
    assert!(group.students.is_empty());
    assert_eq!(group.current_project(), None);
}

#[test]
fn test_project_date_wire_format() {
    let raw = r#"{
        "id": "p1",
        "name": "School Management System",
        "objective": "Digitize enrollment",
        "summaryScope": "Web portal",
        "targetAudience": "School staff",
        "expectedStartDate": "2025-03-01",
        "status": "PENDING_ANALYSIS",
        "requester": {"id": "9", "name": "Lucas"}
    }"#;
    let project: Project = serde_json::from_str(raw).unwrap();

    assert_eq!(project.expected_start_date.to_string(), "2025-03-01");
    assert_eq!(project.status, ProjectStatus::PendingAnalysis);
    assert!(project.group.is_none());

    let serialized = serde_json::to_string(&project).unwrap();
    assert!(serialized.contains("\"expectedStartDate\":\"2025-03-01\""));
}
