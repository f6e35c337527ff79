/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Event-socket channel for live updates.
//!
//! The connection is never assumed: nothing dials out until
//! [`client::RealtimeClient::connect`] is called explicitly. A dropped
//! connection is retried a bounded number of times with a fixed delay,
//! then given up on. Message payloads are forwarded to subscribers as
//! opaque text; their schema is owned by the server.

pub mod client;
pub mod reconnect;

pub use client::{RealtimeClient, SocketEvent};
pub use reconnect::ReconnectPolicy;
