/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod cache;
pub mod consts;
pub mod error;
pub mod input;
pub mod notify;
pub mod permission;
pub mod search;
pub mod session;
pub mod types;

use session::FileStorage;
use std::sync::Arc;
use types::ClientState;

/// Builds the process-wide client state with the default file-backed
/// session storage. Persisted session keys are read once, here; never
/// ad hoc afterwards.
pub fn init_state(endpoint: impl Into<String>) -> Arc<ClientState> {
    Arc::new(ClientState::new(endpoint, Box::new(FileStorage::default())))
}
