/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the session store and its storage backends

extern crate core as atrium_core;
use atrium_core::consts::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER};
use atrium_core::error::{ClientError, ClientResult};
use atrium_core::session::{FileStorage, MemoryStorage, SessionStore, Storage};
use entity::identity::{Identity, IdentityPatch};
use entity::role::Role;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn identity(id: &str, name: &str, role: Role) -> Identity {
    Identity {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.edu", name.to_lowercase()),
        role,
        affiliated_school: None,
    }
}

/// Storage whose writes always fail, for degraded-mode tests.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> ClientResult<()> {
        Err(ClientError::Storage("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> ClientResult<()> {
        Ok(())
    }
}

#[test]
fn test_login_persists_both_keys() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(Box::new(SharedStorage(Arc::clone(&storage))));

    store.login(identity("3", "Ana", Role::Professor), "tok-123".to_string());

    assert_eq!(storage.read(STORAGE_KEY_TOKEN).as_deref(), Some("tok-123"));
    let raw = storage.read(STORAGE_KEY_USER).unwrap();
    let persisted: Identity = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.name, "Ana");

    assert!(store.is_authenticated());
    assert_eq!(store.get_identity().unwrap().role, Role::Professor);
}

#[test]
fn test_logout_clears_both_keys() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(Box::new(SharedStorage(Arc::clone(&storage))));

    store.login(identity("3", "Ana", Role::Professor), "tok-123".to_string());
    store.logout();

    assert_eq!(storage.read(STORAGE_KEY_TOKEN), None);
    assert_eq!(storage.read(STORAGE_KEY_USER), None);
    assert_eq!(store.get_identity(), None);
    assert!(!store.is_authenticated());
}

#[test]
fn test_session_survives_reload() {
    let storage = Arc::new(MemoryStorage::new());

    {
        let store = SessionStore::load(Box::new(SharedStorage(Arc::clone(&storage))));
        store.login(identity("3", "Ana", Role::Admin), "tok-123".to_string());
    }

    // A new store over the same medium sees the persisted session.
    let store = SessionStore::load(Box::new(SharedStorage(storage)));
    assert!(store.is_authenticated());
    assert_eq!(store.get_identity().unwrap().id, "3");
}

#[test]
fn test_malformed_identity_is_treated_as_absent() {
    let storage = Arc::new(MemoryStorage::new());
    storage.write(STORAGE_KEY_TOKEN, "tok-123").unwrap();
    storage.write(STORAGE_KEY_USER, "{not valid json").unwrap();

    let store = SessionStore::load(Box::new(SharedStorage(storage)));

    assert_eq!(store.get_identity(), None);
    // The token key is independent of the identity blob.
    assert!(store.is_authenticated());
}

#[test]
fn test_update_identity_merges_and_repersists() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(Box::new(SharedStorage(Arc::clone(&storage))));
    store.login(identity("3", "Ana", Role::Professor), "tok-123".to_string());

    store.update_identity(IdentityPatch {
        name: Some("Ana Maria".to_string()),
        affiliated_school: Some("IFPR".to_string()),
        ..Default::default()
    });

    let current = store.get_identity().unwrap();
    assert_eq!(current.name, "Ana Maria");
    assert_eq!(current.email, "ana@example.edu");
    assert_eq!(current.affiliated_school.as_deref(), Some("IFPR"));
    // Role and id are not expressible in the patch.
    assert_eq!(current.role, Role::Professor);
    assert_eq!(current.id, "3");

    let raw = storage.read(STORAGE_KEY_USER).unwrap();
    let persisted: Identity = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.name, "Ana Maria");
}

#[test]
fn test_update_identity_without_session_is_noop() {
    let store = SessionStore::load(Box::new(MemoryStorage::new()));

    store.update_identity(IdentityPatch {
        name: Some("Ghost".to_string()),
        ..Default::default()
    });

    assert_eq!(store.get_identity(), None);
}

#[test]
fn test_observers_run_synchronously() {
    let store = SessionStore::load(Box::new(MemoryStorage::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_observer = Arc::clone(&seen);

    store.subscribe(move |identity| {
        seen_by_observer
            .lock()
            .unwrap()
            .push(identity.map(|i| i.name.clone()));
    });

    store.login(identity("3", "Ana", Role::Professor), "tok".to_string());
    // The notification already happened, in the same task.
    assert_eq!(seen.lock().unwrap().last().unwrap().as_deref(), Some("Ana"));

    store.logout();
    assert_eq!(seen.lock().unwrap().last().unwrap(), &None);
}

#[test]
fn test_broken_storage_degrades_to_memory() {
    let store = SessionStore::load(Box::new(BrokenStorage));

    store.login(identity("3", "Ana", Role::Professor), "tok".to_string());

    // The session works in memory despite the failing medium.
    assert!(store.is_authenticated());
    assert_eq!(store.get_identity().unwrap().name, "Ana");
    assert!(store.is_degraded());
}

#[test]
fn test_file_storage_round_trip() {
    let path = std::env::temp_dir()
        .join(format!("atrium-session-test-{}", std::process::id()))
        .join("session.toml");
    let storage = FileStorage::at_path(path.clone());

    storage.write(STORAGE_KEY_TOKEN, "tok-123").unwrap();
    assert_eq!(storage.read(STORAGE_KEY_TOKEN).as_deref(), Some("tok-123"));

    storage.remove(STORAGE_KEY_TOKEN).unwrap();
    assert_eq!(storage.read(STORAGE_KEY_TOKEN), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_file_storage_malformed_file_is_absent() {
    let dir = std::env::temp_dir().join(format!("atrium-malformed-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.toml");
    std::fs::write(&path, "this is [not toml").unwrap();

    let storage = FileStorage::at_path(path);
    assert_eq!(storage.read(STORAGE_KEY_TOKEN), None);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_subscriber_count_matches_mutations() {
    let store = SessionStore::load(Box::new(MemoryStorage::new()));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.login(identity("3", "Ana", Role::Professor), "tok".to_string());
    store.update_identity(IdentityPatch {
        email: Some("new@example.edu".to_string()),
        ..Default::default()
    });
    store.logout();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// Adapter so a shared `MemoryStorage` can back a store while the test
/// keeps its own handle for inspection.
struct SharedStorage(Arc<MemoryStorage>);

impl Storage for SharedStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.0.read(key)
    }

    fn write(&self, key: &str, value: &str) -> ClientResult<()> {
        self.0.write(key, value)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.0.remove(key)
    }
}
