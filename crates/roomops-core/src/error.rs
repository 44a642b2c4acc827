// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Roomops assistant.

use thiserror::Error;

/// The primary error type used across store traits, the confirmation
/// protocol, the orchestrator, and the HTTP gateway.
///
/// Tool execution failures are deliberately NOT represented here: a tool
/// returns its failure as data (`{"error": ...}`) so a single bad tool call
/// degrades that tool's result without aborting the whole turn.
#[derive(Debug, Error)]
pub enum OpsError {
    /// No authenticated principal attached to the request, or the principal
    /// does not own the resource it is touching.
    #[error("unauthorized")]
    Unauthorized,

    /// A room, task, conversation, or document does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A field name outside the closed editable-field catalogue.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Request-level validation failure (missing user message, malformed
    /// payload, value not admissible for the target field).
    #[error("validation error: {0}")]
    Validation(String),

    /// The underlying store write or read failed.
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (API failure, token limits, mid-stream abort).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OpsError {
    /// Convenience constructor for a `NotFound` on a room number.
    pub fn room_not_found(room_number: &str) -> Self {
        OpsError::NotFound {
            kind: "room",
            id: room_number.to_string(),
        }
    }

    /// Wraps any error as a persistence failure.
    pub fn persistence<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        OpsError::Persistence {
            source: Box::new(source),
        }
    }
}
