/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for entity enums

use entity::project::ProjectStatus;
use entity::role::Role;
use strum::IntoEnumIterator;

#[test]
fn test_role_parse() {
    assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    assert_eq!(Role::parse("PROFESSOR"), Some(Role::Professor));
    assert_eq!(Role::parse("STUDENT"), Some(Role::Student));

    // Unknown and differently-cased names fail closed.
    assert_eq!(Role::parse("SUPERVISOR"), None);
    assert_eq!(Role::parse("admin"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn test_role_round_trip() {
    for role in Role::iter() {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
}

#[test]
fn test_role_wire_format() {
    let serialized = serde_json::to_string(&Role::Professor).unwrap();
    assert_eq!(serialized, "\"PROFESSOR\"");

    let parsed: Role = serde_json::from_str("\"STUDENT\"").unwrap();
    assert_eq!(parsed, Role::Student);

    assert!(serde_json::from_str::<Role>("\"TEACHER\"").is_err());
}

#[test]
fn test_project_status_wire_format() {
    assert_eq!(
        serde_json::to_string(&ProjectStatus::PendingAnalysis).unwrap(),
        "\"PENDING_ANALYSIS\""
    );
    assert_eq!(
        serde_json::from_str::<ProjectStatus>("\"IN_PROGRESS\"").unwrap(),
        ProjectStatus::InProgress
    );
}

#[test]
fn test_project_status_labels() {
    for status in ProjectStatus::iter() {
        assert!(!status.label().is_empty());
        assert_eq!(status.to_string(), status.as_str());
    }
    assert_eq!(ProjectStatus::UnderAnalysis.label(), "Under analysis");
}
