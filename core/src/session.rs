/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use entity::identity::{Identity, IdentityPatch};

use super::consts::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER};
use super::error::{ClientError, ClientResult};

/// Persistence medium for the session keys. Implementations must not
/// panic; unavailability is reported through the error path and the
/// store degrades to memory-only for the rest of the session.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// TOML file under the platform configuration directory, one entry per
/// key. Malformed contents are treated as absent, never as a crash.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn at_path(path: PathBuf) -> Self {
        FileStorage { path }
    }

    fn load_map(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };

        toml::from_str(&contents).unwrap_or_default()
    }

    fn store_map(&self, map: &BTreeMap<String, String>) -> ClientResult<()> {
        let contents =
            toml::to_string_pretty(map).map_err(|err| ClientError::Storage(err.to_string()))?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| ClientError::Storage(err.to_string()))?;
        }

        fs::write(&self.path, contents).map_err(|err| ClientError::Storage(err.to_string()))
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("atrium");
        path.push("session.toml");
        FileStorage { path }
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.load_map().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        self.store_map(&map)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self.load_map();
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.store_map(&map)
    }
}

/// In-memory storage: tests and degraded sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("storage lock").get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .lock()
            .expect("storage lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().expect("storage lock").remove(key);
        Ok(())
    }
}

struct SessionData {
    identity: Option<Identity>,
    token: Option<String>,
}

type IdentityObserver = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

/// Single source of truth for "who is logged in", surviving reloads via
/// the persisted storage it is backed by (not replaced by): the
/// in-memory copy is read once at construction and written through on
/// every change. Observers are notified synchronously within the same
/// task, so no consumer can momentarily render a stale role.
pub struct SessionStore {
    data: RwLock<SessionData>,
    storage: Box<dyn Storage>,
    degraded: AtomicBool,
    observers: Mutex<Vec<IdentityObserver>>,
}

impl SessionStore {
    /// Reads both persisted keys once. A malformed identity blob is
    /// discarded and the session starts unauthenticated.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let token = storage.read(STORAGE_KEY_TOKEN);
        let identity = storage
            .read(STORAGE_KEY_USER)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        SessionStore {
            data: RwLock::new(SessionData { identity, token }),
            storage,
            degraded: AtomicBool::new(false),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Stores the authenticated identity and token, writing both keys
    /// through. A failing medium degrades the session to memory-only
    /// instead of surfacing an error to the caller.
    pub fn login(&self, identity: Identity, token: String) {
        {
            let mut data = self.data.write().expect("session lock");
            data.token = Some(token.clone());
            data.identity = Some(identity.clone());
        }

        self.persist(STORAGE_KEY_TOKEN, &token);
        if let Ok(raw) = serde_json::to_string(&identity) {
            self.persist(STORAGE_KEY_USER, &raw);
        }

        self.notify_observers();
    }

    /// Clears the identity and both persisted keys. Cached entity data
    /// tied to the session must be invalidated by the caller so records
    /// never leak into the next login on the same device.
    pub fn logout(&self) {
        {
            let mut data = self.data.write().expect("session lock");
            data.token = None;
            data.identity = None;
        }

        for key in [STORAGE_KEY_TOKEN, STORAGE_KEY_USER] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!(%err, key, "failed to clear persisted session key");
            }
        }

        self.notify_observers();
    }

    /// Merges profile fields into the current identity and re-persists.
    /// `role` and `id` are not representable in the patch; a server
    /// response is trusted for informational fields only. A no-op when
    /// unauthenticated.
    pub fn update_identity(&self, patch: IdentityPatch) {
        let updated = {
            let mut data = self.data.write().expect("session lock");
            let Some(identity) = data.identity.as_mut() else {
                return;
            };

            if let Some(name) = patch.name {
                identity.name = name;
            }
            if let Some(email) = patch.email {
                identity.email = email;
            }
            if let Some(school) = patch.affiliated_school {
                identity.affiliated_school = Some(school);
            }

            identity.clone()
        };

        if let Ok(raw) = serde_json::to_string(&updated) {
            self.persist(STORAGE_KEY_USER, &raw);
        }

        self.notify_observers();
    }

    /// Synchronous read of the current identity; never fails.
    pub fn get_identity(&self) -> Option<Identity> {
        self.data.read().expect("session lock").identity.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.data.read().expect("session lock").token.clone()
    }

    /// Predicate consumed by route gates: absence of a token means the
    /// unauthenticated state.
    pub fn is_authenticated(&self) -> bool {
        self.data.read().expect("session lock").token.is_some()
    }

    /// Whether the persistence medium has failed this session.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Registers an observer called synchronously, within the mutating
    /// task, on every identity change.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(Option<&Identity>) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .expect("observer lock")
            .push(Box::new(observer));
    }

    fn persist(&self, key: &str, value: &str) {
        if self.degraded.load(Ordering::Relaxed) {
            return;
        }

        if let Err(err) = self.storage.write(key, value) {
            tracing::warn!(%err, key, "session storage unavailable, continuing in memory only");
            self.degraded.store(true, Ordering::Relaxed);
        }
    }

    fn notify_observers(&self) {
        let identity = self.get_identity();
        let observers = self.observers.lock().expect("observer lock");
        for observer in observers.iter() {
            observer(identity.as_ref());
        }
    }
}
