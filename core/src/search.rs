/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::group::Group;
use entity::project::Project;
use entity::user::User;

/// Case-insensitive substring search over the fixed set of fields a
/// list page indexes for its entity type. Pure; no network or cache
/// access.
pub trait Matches {
    /// `needle` is already trimmed and lowercased by [`filter`].
    fn matches(&self, needle: &str) -> bool;
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Matches for User {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle) || contains(&self.email, needle)
    }
}

impl Matches for Group {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || self
                .coordinator
                .as_ref()
                .is_some_and(|c| contains(&c.name, needle))
            || self.projects.iter().any(|p| contains(&p.name, needle))
    }
}

impl Matches for Project {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.objective, needle)
            || contains(&self.summary_scope, needle)
            || contains(&self.target_audience, needle)
            || self.group.as_ref().is_some_and(|g| {
                contains(&g.name, needle)
                    || g.coordinator
                        .as_ref()
                        .is_some_and(|c| contains(&c.name, needle))
            })
    }
}

/// Filters a list by query. An empty (or all-whitespace) query returns
/// the input unchanged.
pub fn filter<T: Matches + Clone>(items: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches(&needle))
        .cloned()
        .collect()
}
