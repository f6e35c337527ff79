/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Client-side data layer for the Atrium academic project-management
//! platform: a persisted session store, a normalized entity cache, a
//! role-scoped permission resolver, the mutation orchestrator wiring
//! them to the GraphQL connector, and an event-socket channel.

pub mod api;
pub mod guard;
pub mod orchestrator;

use std::sync::Arc;

use api::HttpApi;
use atrium_core::types::ClientState;
use orchestrator::MutationOrchestrator;
use realtime::RealtimeClient;

/// One fully wired client. The realtime channel is constructed but not
/// connected; live updates stay off until `realtime.connect()` is
/// called explicitly.
pub struct AtriumClient {
    pub state: Arc<ClientState>,
    pub mutations: MutationOrchestrator,
    pub realtime: Arc<RealtimeClient>,
}

impl AtriumClient {
    /// Predicate for route gates: no token means unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_authenticated()
    }
}

/// Builds the process-wide client against a GraphQL endpoint and an
/// event-socket URL. The persisted session keys are read once, here.
pub fn init_client(endpoint: impl Into<String>, socket_url: impl Into<String>) -> AtriumClient {
    let state = atrium_core::init_state(endpoint);

    AtriumClient {
        mutations: MutationOrchestrator::new(Arc::clone(&state), Arc::new(HttpApi)),
        realtime: Arc::new(RealtimeClient::new(socket_url)),
        state,
    }
}
