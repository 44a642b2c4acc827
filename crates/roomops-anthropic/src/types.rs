// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API request/response types and SSE event payloads.

use serde::{Deserialize, Serialize};

/// A tool definition in the Messages API format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's input.
    pub input_schema: serde_json::Value,
}

/// A request to the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

/// One message in the wire conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: ApiContent,
}

/// Message content, either a bare string or typed blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiContent {
    Text(String),
    Blocks(Vec<ApiContentBlock>),
}

/// A typed content block within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ApiContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    /// The assistant requesting a tool invocation.
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// A tool's result, echoed back in a user-role message.
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

/// A complete (non-streaming) response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: Vec<ResponseContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: ApiUsage,
}

/// A content block in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

// --- SSE event payloads ---

#[derive(Debug, Clone, Deserialize)]
pub struct SseMessageStart {
    pub message: SseMessageStartInfo,
}

/// Subset of the initial message object we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct SseMessageStartInfo {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub usage: ApiUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseContentBlockStart {
    pub index: usize,
    pub content_block: ResponseContentBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseContentBlockDelta {
    pub index: usize,
    pub delta: SseDelta,
}

/// A delta within a content block.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SseDelta {
    #[serde(rename = "text_delta")]
    TextDelta { text: String },
    /// Partial JSON for a tool_use block's input.
    #[serde(rename = "input_json_delta")]
    InputJsonDelta { partial_json: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseContentBlockStop {
    pub index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseMessageDelta {
    pub delta: SseMessageDeltaInfo,
    pub usage: Option<ApiUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseMessageDeltaInfo {
    pub stop_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseError {
    pub error: ApiErrorDetail,
}

/// Error body returned by the API, streaming or not.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_fields() {
        let req = MessageRequest {
            model: "claude-sonnet-4-20250514".into(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: ApiContent::Text("Room 204 status?".into()),
            }],
            system: None,
            max_tokens: 1024,
            stream: true,
            tools: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("tools").is_none());
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["content"], "Room 204 status?");
    }

    #[test]
    fn request_serializes_tools() {
        let req = MessageRequest {
            model: "claude-sonnet-4-20250514".into(),
            messages: vec![],
            system: Some("You run hotel operations.".into()),
            max_tokens: 1024,
            stream: false,
            tools: Some(vec![ToolDefinition {
                name: "getRoomInfo".into(),
                description: "Get a room's state".into(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "roomNumber": {"type": "string"} },
                    "required": ["roomNumber"]
                }),
            }]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["tools"][0]["name"], "getRoomInfo");
        assert_eq!(json["system"], "You run hotel operations.");
    }

    #[test]
    fn tool_result_block_round_trips() {
        let block = ApiContentBlock::ToolResult {
            tool_use_id: "toolu_1".into(),
            content: r#"{"roomNumber":"204"}"#.into(),
            is_error: None,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert_eq!(json["tool_use_id"], "toolu_1");
        assert!(json.get("is_error").is_none());
    }

    #[test]
    fn deserialize_response_with_tool_use() {
        let json = r#"{
            "id": "msg_1",
            "content": [
                {"type": "text", "text": "Checking room 204."},
                {"type": "tool_use", "id": "toolu_1", "name": "getRoomInfo",
                 "input": {"roomNumber": "204"}}
            ],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 20, "output_tokens": 15}
        }"#;
        let resp: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.stop_reason, Some("tool_use".into()));
        assert!(matches!(&resp.content[1], ResponseContentBlock::ToolUse { name, .. } if name == "getRoomInfo"));
    }

    #[test]
    fn deserialize_input_json_delta() {
        let json =
            r#"{"index": 1, "delta": {"type": "input_json_delta", "partial_json": "{\"room"}}"#;
        let delta: SseContentBlockDelta = serde_json::from_str(json).unwrap();
        assert_eq!(delta.index, 1);
        assert!(matches!(
            delta.delta,
            SseDelta::InputJsonDelta { ref partial_json } if partial_json == "{\"room"
        ));
    }

    #[test]
    fn deserialize_message_delta_with_usage() {
        let json = r#"{"delta": {"stop_reason": "end_turn"},
                       "usage": {"input_tokens": 10, "output_tokens": 42}}"#;
        let md: SseMessageDelta = serde_json::from_str(json).unwrap();
        assert_eq!(md.delta.stop_reason, Some("end_turn".into()));
        assert_eq!(md.usage.unwrap().output_tokens, 42);
    }
}
