/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A user-facing toast emitted by the mutation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub detail: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            title: title.into(),
            detail: None,
        }
    }

    pub fn failure(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Failure,
            title: title.into(),
            detail: Some(detail.into()),
        }
    }
}

type NotificationObserver = Box<dyn Fn(&Notification) + Send + Sync>;

/// Synchronous fan-out of notifications to whatever surface renders
/// them. Observers run within the emitting task.
#[derive(Default)]
pub struct Notifier {
    observers: Mutex<Vec<NotificationObserver>>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .expect("observer lock")
            .push(Box::new(observer));
    }

    pub fn emit(&self, notification: Notification) {
        let observers = self.observers.lock().expect("observer lock");
        for observer in observers.iter() {
            observer(&notification);
        }
    }
}
