/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::fmt;

/// Client-side error taxonomy. Every fallible path in the data layer
/// resolves to one of these; none of them is allowed to panic the
/// caller or leak into a render path as an unwind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Missing or expired credentials. The session is cleared and the
    /// caller is expected to route to the login surface.
    Auth(String),
    /// Locally detected bad input; nothing was sent to the server.
    Validation(String),
    /// The server rejected a write, or the write failed in transit.
    /// The cache is left untouched.
    Mutation(String),
    /// A read failed. Stale cached data, if any, may still be shown
    /// alongside the error.
    Query(String),
    /// The persistence medium is unavailable. The session degrades to
    /// memory-only; no user-facing interruption.
    Storage(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            ClientError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ClientError::Mutation(msg) => write!(f, "Mutation failed: {}", msg),
            ClientError::Query(msg) => write!(f, "Query failed: {}", msg),
            ClientError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;

// Helper constructors for common scenarios
impl ClientError {
    pub fn invalid_credentials() -> Self {
        ClientError::Auth("Invalid credentials".to_string())
    }

    pub fn not_authenticated() -> Self {
        ClientError::Auth("Not authenticated".to_string())
    }

    pub fn duplicate_submission() -> Self {
        ClientError::Validation("Duplicate submission dropped".to_string())
    }

    pub fn invalid_date(value: &str) -> Self {
        ClientError::Validation(format!("`{}` is not a valid date", value))
    }

    pub fn group_unavailable(name: &str) -> Self {
        ClientError::Validation(format!("Group `{}` is not available for projects", name))
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Auth(msg)
            | ClientError::Validation(msg)
            | ClientError::Mutation(msg)
            | ClientError::Query(msg)
            | ClientError::Storage(msg) => msg,
        }
    }
}
