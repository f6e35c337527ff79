/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::time::Duration;

/// Bounded fixed-delay retry parameters for the event socket. The
/// retry budget is finite; once it is spent the channel stays down
/// until the next explicit `connect()` call.
#[derive(Clone, Copy, Debug)]
pub struct ReconnectPolicy {
    /// How many reconnection attempts are made before giving up.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

impl ReconnectPolicy {
    /// Whether another attempt may be made after `attempts_made`
    /// failures.
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}
