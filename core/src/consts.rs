/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::time::Duration;

/// Persisted-storage key for the opaque bearer token.
pub const STORAGE_KEY_TOKEN: &str = "token";
/// Persisted-storage key for the JSON-serialized identity.
pub const STORAGE_KEY_USER: &str = "user";

/// Wire format for dates without a time component.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A create resubmission carrying the same submission id inside this
/// window is dropped locally instead of re-sent.
pub const DUPLICATE_SUBMISSION_WINDOW: Duration = Duration::from_secs(10);

pub const GENERATED_PASSWORD_LEN: usize = 8;
