// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use roomops_tools::ToolProgress;
use serde::Serialize;

/// Incremental output of one turn, in emission order.
///
/// Everything already flushed stands even if the turn later fails; `Error`
/// is terminal and carries the failure, `Finished` is terminal and names the
/// persisted assistant message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TurnEvent {
    TextDelta {
        delta: String,
    },
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_call_id: String,
        output: serde_json::Value,
        is_error: bool,
    },
    /// Side-channel event from a running tool.
    Progress {
        event: ToolProgress,
    },
    Finished {
        conversation_id: String,
        message_id: String,
    },
    Error {
        message: String,
    },
}
