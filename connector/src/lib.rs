/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod groups;
pub mod projects;
pub mod users;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Connection parameters for one request. The token comes from the
/// session store; operations issued before login carry none.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub endpoint: String,
    pub token: Option<String>,
}

/// Failure to obtain a well-formed GraphQL response at all. Server-side
/// operation errors are not this; they travel inside
/// [`OperationOutcome::errors`].
#[derive(Debug, Clone)]
pub enum RequestError {
    Transport(String),
    MalformedResponse(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Transport(msg) => write!(f, "Request failed: {}", msg),
            RequestError::MalformedResponse(msg) => {
                write!(f, "Malformed server response: {}", msg)
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// One server-reported GraphQL error.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

/// Result of a named operation: the deserialized root field, if the
/// server produced one, plus whatever errors it reported alongside.
/// Requests run under an all-errors policy, so partial data and errors
/// can both be present and both must be handled.
#[derive(Debug)]
pub struct OperationOutcome<T> {
    pub data: Option<T>,
    pub errors: Vec<GraphQlError>,
}

impl<T> OperationOutcome<T> {
    /// The server-provided messages joined for display, if any.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }

        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[derive(Serialize)]
struct OperationRequest<'a> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: Value,
}

fn decode_envelope<T: DeserializeOwned>(
    envelope: Envelope,
    root_field: &str,
) -> Result<OperationOutcome<T>, RequestError> {
    let errors = envelope.errors.unwrap_or_default();

    let data = match envelope.data {
        None | Some(Value::Null) => None,
        Some(value) => match value.get(root_field) {
            None | Some(Value::Null) => None,
            Some(field) => Some(
                serde_json::from_value(field.clone())
                    .map_err(|err| RequestError::MalformedResponse(err.to_string()))?,
            ),
        },
    };

    Ok(OperationOutcome { data, errors })
}

pub(crate) async fn execute<T: DeserializeOwned>(
    config: &RequestConfig,
    operation_name: &'static str,
    query: &'static str,
    variables: Value,
    root_field: &'static str,
) -> Result<OperationOutcome<T>, RequestError> {
    let client = reqwest::Client::new();
    let mut request = client
        .post(&config.endpoint)
        .header("Content-Type", "application/json")
        .json(&OperationRequest {
            query,
            operation_name,
            variables,
        });

    if let Some(token) = &config.token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request
        .send()
        .await
        .map_err(|err| RequestError::Transport(err.to_string()))?;

    let envelope: Envelope = response
        .json()
        .await
        .map_err(|err| RequestError::MalformedResponse(err.to_string()))?;

    decode_envelope(envelope, root_field)
}
