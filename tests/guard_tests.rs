/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the confirmation gate state machine

use atrium_client::guard::{ConfirmGate, GateState};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn test_starts_idle() {
    let gate = ConfirmGate::new("Delete user", "This cannot be undone.");

    assert_eq!(gate.state(), GateState::Idle);
    assert_eq!(gate.title(), "Delete user");
    assert_eq!(gate.description(), "This cannot be undone.");
}

#[test]
fn test_handler_opens_prompt_without_running_action() {
    let gate = ConfirmGate::new("Delete user", "");
    let runs = counter();

    let seen = Arc::clone(&runs);
    let handler = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    handler();
    assert_eq!(gate.state(), GateState::Prompting);
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_confirm_runs_action_once_and_returns_to_idle() {
    let gate = ConfirmGate::new("Delete user", "");
    let runs = counter();

    let seen = Arc::clone(&runs);
    let handler = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    handler();
    gate.confirm();

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(gate.state(), GateState::Idle);

    // A second confirm has nothing parked.
    gate.confirm();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cancel_discards_action() {
    let gate = ConfirmGate::new("Delete user", "");
    let runs = counter();

    let seen = Arc::clone(&runs);
    let handler = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    handler();
    gate.cancel();
    assert_eq!(gate.state(), GateState::Idle);

    gate.confirm();
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_second_request_while_prompting_wins() {
    let gate = ConfirmGate::new("Delete user", "");
    let first_runs = counter();
    let second_runs = counter();

    let seen = Arc::clone(&first_runs);
    let first = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let seen = Arc::clone(&second_runs);
    let second = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    first();
    second();
    gate.confirm();

    assert_eq!(first_runs.load(Ordering::SeqCst), 0);
    assert_eq!(second_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_gate_is_reusable_after_settling() {
    let gate = ConfirmGate::new("Remove student", "");
    let runs = counter();

    let seen = Arc::clone(&runs);
    let handler = gate.guard(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    handler();
    gate.confirm();
    handler();
    gate.confirm();

    assert_eq!(runs.load(Ordering::SeqCst), 2);
}
