// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use roomops_core::DocumentKind;
use serde::Serialize;

/// Terminal result of one tool invocation, fed back to the model as the
/// tool_result content.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    /// JSON-encoded payload.
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            content: value.to_string(),
            is_error: false,
        }
    }

    /// Wraps a failure as `{"error": ...}` content with the error flag set.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: serde_json::json!({ "error": message.to_string() }).to_string(),
            is_error: true,
        }
    }
}

/// Incremental side-channel events emitted while a tool runs.
///
/// Ordered per invocation; the gateway forwards them to the client stream
/// interleaved with assistant text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ToolProgress {
    DocumentStart {
        document_id: String,
        title: String,
        kind: DocumentKind,
    },
    DocumentDelta {
        document_id: String,
        delta: String,
    },
    DocumentFinish {
        document_id: String,
    },
    SuggestionReady {
        document_id: String,
        suggestion_id: String,
        description: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_output_wraps_message() {
        let out = ToolOutput::error("room 999 not found");
        assert!(out.is_error);
        let value: serde_json::Value = serde_json::from_str(&out.content).unwrap();
        assert_eq!(value["error"], "room 999 not found");
    }

    #[test]
    fn progress_events_serialize_tagged() {
        let event = ToolProgress::DocumentDelta {
            document_id: "d1".into(),
            delta: "Checklist".into(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "document-delta");
        assert_eq!(value["documentId"], "d1");
    }
}
