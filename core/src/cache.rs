/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::collections::{HashMap, HashSet};

use entity::group::{Group, GroupRef};
use entity::project::Project;
use entity::user::{ListItem, User};

use super::types::EntityKind;

#[derive(Default)]
struct Staleness {
    all: bool,
    ids: HashSet<String>,
}

impl Staleness {
    fn mark(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.ids.insert(id.to_string());
            }
            None => {
                self.all = true;
                self.ids.clear();
            }
        }
    }

    fn clear(&mut self, id: &str) {
        self.ids.remove(id);
    }

    fn reset(&mut self) {
        self.all = false;
        self.ids.clear();
    }

    fn contains(&self, id: &str) -> bool {
        self.all || self.ids.contains(id)
    }
}

/// Normalized, id-keyed mirror of the server-owned entities.
///
/// Reconciliation is last-response-wins per record: whatever response
/// is applied last overwrites that record, which under two concurrent
/// in-flight writes may not match the last request sent. Callers that
/// need submission-order guarantees must serialize their submissions.
///
/// Full-projection responses go through `upsert_*`/`replace_*`; the
/// mutations whose responses are partial projections by design get
/// dedicated patch methods and no upsert path, so a partial payload can
/// never wipe fields it did not include. Reads hand out clones, never
/// references into the stores.
#[derive(Default)]
pub struct EntityCache {
    users: HashMap<String, User>,
    groups: HashMap<String, Group>,
    projects: HashMap<String, Project>,
    stale_users: Staleness,
    stale_groups: Staleness,
    stale_projects: Staleness,
}

impl EntityCache {
    pub fn new() -> Self {
        EntityCache::default()
    }

    // --- users ---

    pub fn upsert_user(&mut self, user: User) {
        self.stale_users.clear(&user.id);
        self.users.insert(user.id.clone(), user);
    }

    pub fn remove_user(&mut self, id: &str) -> Option<User> {
        self.stale_users.clear(id);
        self.users.remove(id)
    }

    /// Replaces the whole store from a full list query and clears the
    /// type's staleness.
    pub fn replace_users(&mut self, users: Vec<User>) {
        self.stale_users.reset();
        self.users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        users
    }

    pub fn users_where<P>(&self, predicate: P) -> Vec<User>
    where
        P: Fn(&User) -> bool,
    {
        self.users().into_iter().filter(|u| predicate(u)).collect()
    }

    // --- groups ---

    pub fn upsert_group(&mut self, group: Group) {
        self.stale_groups.clear(&group.id);
        self.groups.insert(group.id.clone(), group);
    }

    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        self.stale_groups.reset();
        self.groups = groups.into_iter().map(|g| (g.id.clone(), g)).collect();
    }

    pub fn group(&self, id: &str) -> Option<Group> {
        self.groups.get(id).cloned()
    }

    pub fn groups(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = self.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        groups
    }

    pub fn groups_where<P>(&self, predicate: P) -> Vec<Group>
    where
        P: Fn(&Group) -> bool,
    {
        self.groups().into_iter().filter(|g| predicate(g)).collect()
    }

    /// Groups that may be offered as assignment targets.
    pub fn available_groups(&self) -> Vec<Group> {
        self.groups_where(|g| g.available_for_projects)
    }

    /// Applies the availability flag from the partial `updateGroup`
    /// projection. Returns false when the group is not cached.
    pub fn set_group_availability(&mut self, id: &str, available: bool) -> bool {
        match self.groups.get_mut(id) {
            Some(group) => {
                group.available_for_projects = available;
                true
            }
            None => false,
        }
    }

    /// Applies the member list from the partial `groupAddStudent` /
    /// `groupRemoveStudent` projections.
    pub fn set_group_students(&mut self, id: &str, students: Vec<ListItem>) -> bool {
        match self.groups.get_mut(id) {
            Some(group) => {
                group.students = students;
                true
            }
            None => false,
        }
    }

    // --- projects ---

    pub fn upsert_project(&mut self, project: Project) {
        self.stale_projects.clear(&project.id);
        self.projects.insert(project.id.clone(), project);
    }

    pub fn remove_project(&mut self, id: &str) -> Option<Project> {
        self.stale_projects.clear(id);
        self.projects.remove(id)
    }

    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        self.stale_projects.reset();
        self.projects = projects.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    pub fn project(&self, id: &str) -> Option<Project> {
        self.projects.get(id).cloned()
    }

    pub fn projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        projects
    }

    pub fn projects_where<P>(&self, predicate: P) -> Vec<Project>
    where
        P: Fn(&Project) -> bool,
    {
        self.projects().into_iter().filter(|p| predicate(p)).collect()
    }

    /// Links a project to a group on both sides of the relation in one
    /// call, so no reader can observe the link half-made: the project's
    /// `group` field and the group's `projects` list change together.
    /// Returns false, touching nothing, when either record is missing.
    pub fn assign_project_to_group(&mut self, project_id: &str, group_id: &str) -> bool {
        let group_ref = match self.groups.get(group_id) {
            Some(group) => GroupRef {
                id: group.id.clone(),
                name: group.name.clone(),
                coordinator: group.coordinator.clone(),
            },
            None => return false,
        };

        let project_item = match self.projects.get_mut(project_id) {
            Some(project) => {
                let item = ListItem {
                    id: project.id.clone(),
                    name: project.name.clone(),
                };
                project.group = Some(group_ref);
                item
            }
            None => return false,
        };

        if let Some(group) = self.groups.get_mut(group_id) {
            if !group.projects.iter().any(|item| item.id == project_item.id) {
                group.projects.push(project_item);
            }
        }

        true
    }

    // --- staleness ---

    /// Marks one record (or, with `None`, the whole type) as stale.
    /// Stale records stay readable; the flag tells callers the next
    /// read should go to the server.
    pub fn invalidate(&mut self, kind: EntityKind, id: Option<&str>) {
        self.staleness_mut(kind).mark(id);
    }

    pub fn is_stale(&self, kind: EntityKind, id: &str) -> bool {
        self.staleness(kind).contains(id)
    }

    pub fn is_list_stale(&self, kind: EntityKind) -> bool {
        self.staleness(kind).all
    }

    /// Drops every record and staleness flag; called at logout so the
    /// previous account's data cannot leak into the next session.
    pub fn clear(&mut self) {
        self.users.clear();
        self.groups.clear();
        self.projects.clear();
        self.stale_users.reset();
        self.stale_groups.reset();
        self.stale_projects.reset();
    }

    fn staleness(&self, kind: EntityKind) -> &Staleness {
        match kind {
            EntityKind::User => &self.stale_users,
            EntityKind::Group => &self.stale_groups,
            EntityKind::Project => &self.stale_projects,
        }
    }

    fn staleness_mut(&mut self, kind: EntityKind) -> &mut Staleness {
        match kind {
            EntityKind::User => &mut self.stale_users,
            EntityKind::Group => &mut self.stale_groups,
            EntityKind::Project => &mut self.stale_projects,
        }
    }
}
