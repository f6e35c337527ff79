/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::RwLock;

use super::cache::EntityCache;
use super::notify::Notifier;
use super::session::{SessionStore, Storage};

/// Entity families the cache and the permission resolver know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Group,
    Project,
}

/// Process-wide client state shared by every surface: the session, the
/// normalized entity cache, and the notification channel. There is one
/// instance per process; all mutation goes through interior locks and
/// is synchronous apart from network round-trips.
pub struct ClientState {
    pub endpoint: String,
    pub session: SessionStore,
    pub cache: RwLock<EntityCache>,
    pub notifier: Notifier,
}

impl ClientState {
    pub fn new(endpoint: impl Into<String>, storage: Box<dyn Storage>) -> Self {
        ClientState {
            endpoint: endpoint.into(),
            session: SessionStore::load(storage),
            cache: RwLock::new(EntityCache::new()),
            notifier: Notifier::new(),
        }
    }
}
