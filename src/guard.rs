/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::{Arc, Mutex};

type PendingAction = Box<dyn FnOnce() + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Prompting,
}

/// Two-phase commit gate for destructive actions, decoupled from what
/// the action does. [`guard`](Self::guard) wraps an action into a
/// click handler; invoking the handler opens the prompt and parks the
/// action until [`confirm`](Self::confirm) runs it or
/// [`cancel`](Self::cancel) discards it.
///
/// One prompt is active per gate at a time. Arming the gate while it
/// is already prompting replaces the parked action; the last request
/// wins, nothing queues.
pub struct ConfirmGate {
    title: String,
    description: String,
    pending: Arc<Mutex<Option<PendingAction>>>,
}

impl ConfirmGate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        ConfirmGate {
            title: title.into(),
            description: description.into(),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Prompt copy for the rendering surface.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> GateState {
        if self.pending.lock().expect("gate lock").is_some() {
            GateState::Prompting
        } else {
            GateState::Idle
        }
    }

    pub fn is_prompting(&self) -> bool {
        self.state() == GateState::Prompting
    }

    /// Wraps `action` into a handler. Each handler call intercepts the
    /// triggering event and opens the prompt with that action parked.
    pub fn guard<F>(&self, action: F) -> impl Fn()
    where
        F: Fn() + Send + Sync + 'static,
    {
        let pending = Arc::clone(&self.pending);
        let action = Arc::new(action);

        move || {
            let action = Arc::clone(&action);
            *pending.lock().expect("gate lock") = Some(Box::new(move || (*action)()));
        }
    }

    /// Runs and discards the parked action, returning the gate to idle.
    /// A no-op when nothing is parked.
    pub fn confirm(&self) {
        let action = self.pending.lock().expect("gate lock").take();
        if let Some(action) = action {
            action();
        }
    }

    /// Discards the parked action without running it.
    pub fn cancel(&self) {
        self.pending.lock().expect("gate lock").take();
    }
}
