// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`AnthropicProvider`] bridges the workspace's [`ChatProvider`] seam to the
//! Messages API: transcript conversion, tool definitions, and assembly of
//! tool_use input from partial-JSON stream deltas.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::StreamExt;
use roomops_core::{
    ChatMessage, ChatProvider, ChatRequest, ChatRole, MessagePart, OpsError, ProviderEvent,
    ProviderEventStream, TokenUsage,
};
use tracing::debug;

use crate::client::AnthropicClient;
use crate::sse::StreamEvent;
use crate::types::{
    ApiContent, ApiContentBlock, ApiUsage, MessageRequest, ResponseContentBlock, SseDelta,
    ToolDefinition,
};

const TITLE_MAX_TOKENS: u32 = 512;

pub struct AnthropicProvider {
    client: AnthropicClient,
    /// Model for streaming chat turns.
    chat_model: String,
    /// Cheaper model for one-shot completions (titles, suggestions).
    text_model: String,
}

impl AnthropicProvider {
    pub fn new(client: AnthropicClient, chat_model: String, text_model: String) -> Self {
        Self {
            client,
            chat_model,
            text_model,
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn stream_chat(&self, request: ChatRequest) -> Result<ProviderEventStream, OpsError> {
        let tools: Vec<ToolDefinition> = request
            .tools
            .iter()
            .map(|spec| ToolDefinition {
                name: spec.name.clone(),
                description: spec.description.clone(),
                input_schema: spec.input_schema.clone(),
            })
            .collect();

        let api_request = MessageRequest {
            model: self.chat_model.clone(),
            messages: to_api_messages(&request.messages),
            system: request.system,
            max_tokens: request.max_tokens,
            stream: true,
            tools: (!tools.is_empty()).then_some(tools),
        };

        let events = self.client.stream_message(&api_request).await?;
        Ok(adapt_stream(events))
    }

    async fn complete_text(&self, system: &str, prompt: &str) -> Result<String, OpsError> {
        let request = MessageRequest {
            model: self.text_model.clone(),
            messages: vec![crate::types::ApiMessage {
                role: "user".to_string(),
                content: ApiContent::Text(prompt.to_string()),
            }],
            system: Some(system.to_string()),
            max_tokens: TITLE_MAX_TOKENS,
            stream: false,
            tools: None,
        };
        let response = self.client.complete_message(&request).await?;
        let text: String = response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::ToolUse { .. } => None,
            })
            .collect();
        Ok(text)
    }
}

/// Converts transcript messages to the wire conversation format.
///
/// Tool results live inside stored assistant messages but the API wants them
/// in a user-role message following the assistant's tool_use, so an assistant
/// message carrying results is split into that pair. System and data roles
/// never go over the wire.
pub fn to_api_messages(messages: &[ChatMessage]) -> Vec<crate::types::ApiMessage> {
    let mut out = Vec::new();
    for message in messages {
        match message.role {
            ChatRole::System | ChatRole::Data => continue,
            ChatRole::User => {
                let mut text = ChatMessage::flatten_parts(&message.parts);
                if text.is_empty() {
                    text = message.content.clone();
                }
                if text.is_empty() {
                    continue;
                }
                out.push(crate::types::ApiMessage {
                    role: "user".to_string(),
                    content: ApiContent::Text(text),
                });
            }
            ChatRole::Assistant => {
                let mut assistant_blocks = Vec::new();
                let mut result_blocks = Vec::new();
                for part in &message.parts {
                    match part {
                        MessagePart::Text { text } => {
                            assistant_blocks.push(ApiContentBlock::Text { text: text.clone() });
                        }
                        MessagePart::ToolCall {
                            tool_call_id,
                            tool_name,
                            input,
                        } => assistant_blocks.push(ApiContentBlock::ToolUse {
                            id: tool_call_id.clone(),
                            name: tool_name.clone(),
                            input: input.clone(),
                        }),
                        MessagePart::ToolResult {
                            tool_call_id,
                            output,
                            is_error,
                        } => result_blocks.push(ApiContentBlock::ToolResult {
                            tool_use_id: tool_call_id.clone(),
                            content: match output {
                                serde_json::Value::String(s) => s.clone(),
                                other => other.to_string(),
                            },
                            is_error: is_error.then_some(true),
                        }),
                        MessagePart::Reasoning { .. } | MessagePart::StepStart => {}
                    }
                }
                if !assistant_blocks.is_empty() {
                    out.push(crate::types::ApiMessage {
                        role: "assistant".to_string(),
                        content: ApiContent::Blocks(assistant_blocks),
                    });
                }
                if !result_blocks.is_empty() {
                    out.push(crate::types::ApiMessage {
                        role: "user".to_string(),
                        content: ApiContent::Blocks(result_blocks),
                    });
                }
            }
        }
    }
    out
}

/// A tool_use block under assembly from input_json_delta fragments.
struct PendingToolBlock {
    id: String,
    name: String,
    buffer: String,
}

struct AdaptState {
    tool_blocks: HashMap<usize, PendingToolBlock>,
    stop_reason: Option<String>,
    usage: Option<TokenUsage>,
}

/// Adapts the wire SSE stream to [`ProviderEvent`]s: text deltas pass
/// through, tool_use blocks are buffered until their content_block_stop and
/// emitted as one complete `ToolCall`, and message completion becomes `Done`.
fn adapt_stream(
    events: std::pin::Pin<
        Box<dyn futures::Stream<Item = Result<StreamEvent, OpsError>> + Send>,
    >,
) -> ProviderEventStream {
    let state = AdaptState {
        tool_blocks: HashMap::new(),
        stop_reason: None,
        usage: None,
    };
    let adapted = events
        .scan(state, |state, item| {
            let out: Option<Result<ProviderEvent, OpsError>> = match item {
                Ok(StreamEvent::MessageStart(start)) => {
                    debug!(id = %start.message.id, model = %start.message.model, "stream started");
                    None
                }
                Ok(StreamEvent::ContentBlockStart(start)) => {
                    if let ResponseContentBlock::ToolUse { id, name, .. } = start.content_block {
                        state.tool_blocks.insert(
                            start.index,
                            PendingToolBlock {
                                id,
                                name,
                                buffer: String::new(),
                            },
                        );
                    }
                    None
                }
                Ok(StreamEvent::ContentBlockDelta(delta)) => match delta.delta {
                    SseDelta::TextDelta { text } => Some(Ok(ProviderEvent::TextDelta(text))),
                    SseDelta::InputJsonDelta { partial_json } => {
                        if let Some(block) = state.tool_blocks.get_mut(&delta.index) {
                            block.buffer.push_str(&partial_json);
                        }
                        None
                    }
                },
                Ok(StreamEvent::ContentBlockStop(stop)) => {
                    state.tool_blocks.remove(&stop.index).map(|block| {
                        let input = if block.buffer.trim().is_empty() {
                            Ok(serde_json::json!({}))
                        } else {
                            serde_json::from_str(&block.buffer)
                        };
                        match input {
                            Ok(input) => Ok(ProviderEvent::ToolCall {
                                id: block.id,
                                name: block.name,
                                input,
                            }),
                            Err(e) => Err(OpsError::Provider {
                                message: format!(
                                    "tool_use input for {} did not assemble: {e}",
                                    block.name
                                ),
                                source: Some(Box::new(e)),
                            }),
                        }
                    })
                }
                Ok(StreamEvent::MessageDelta(md)) => {
                    if md.delta.stop_reason.is_some() {
                        state.stop_reason = md.delta.stop_reason;
                    }
                    if let Some(usage) = md.usage {
                        state.usage = Some(to_usage(&usage));
                    }
                    None
                }
                Ok(StreamEvent::MessageStop) => Some(Ok(ProviderEvent::Done {
                    stop_reason: state.stop_reason.take(),
                    usage: state.usage.take(),
                })),
                Ok(StreamEvent::Ping) => None,
                Ok(StreamEvent::Error(err)) => Some(Err(OpsError::Provider {
                    message: format!(
                        "Anthropic API error ({}): {}",
                        err.error.type_, err.error.message
                    ),
                    source: None,
                })),
                Err(e) => Some(Err(e)),
            };
            futures::future::ready(Some(out))
        })
        .filter_map(futures::future::ready);
    Box::pin(adapted)
}

fn to_usage(usage: &ApiUsage) -> TokenUsage {
    TokenUsage {
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomops_core::ToolSpec;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_message(text: &str) -> ChatMessage {
        ChatMessage {
            id: "m1".into(),
            conversation_id: "c1".into(),
            role: ChatRole::User,
            parts: vec![MessagePart::Text { text: text.into() }],
            content: text.into(),
            created_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn transcript_splits_tool_results_into_user_message() {
        let messages = vec![
            user_message("What is room 204?"),
            ChatMessage {
                id: "m2".into(),
                conversation_id: "c1".into(),
                role: ChatRole::Assistant,
                parts: vec![
                    MessagePart::Text {
                        text: "Checking.".into(),
                    },
                    MessagePart::ToolCall {
                        tool_call_id: "toolu_1".into(),
                        tool_name: "getRoomInfo".into(),
                        input: serde_json::json!({"roomNumber": "204"}),
                    },
                    MessagePart::ToolResult {
                        tool_call_id: "toolu_1".into(),
                        output: serde_json::json!({"status": "TODO"}),
                        is_error: false,
                    },
                ],
                content: "Checking.".into(),
                created_at: "2026-01-01T00:00:01Z".into(),
            },
        ];

        let api = to_api_messages(&messages);
        assert_eq!(api.len(), 3);
        assert_eq!(api[0].role, "user");
        assert_eq!(api[1].role, "assistant");
        assert_eq!(api[2].role, "user");

        let ApiContent::Blocks(blocks) = &api[1].content else {
            panic!("expected blocks");
        };
        assert!(matches!(&blocks[1], ApiContentBlock::ToolUse { name, .. } if name == "getRoomInfo"));

        let ApiContent::Blocks(results) = &api[2].content else {
            panic!("expected blocks");
        };
        assert!(
            matches!(&results[0], ApiContentBlock::ToolResult { tool_use_id, .. } if tool_use_id == "toolu_1")
        );
    }

    #[test]
    fn system_and_data_roles_never_hit_the_wire() {
        let mut data = user_message("internal");
        data.role = ChatRole::Data;
        let mut system = user_message("system prompt");
        system.role = ChatRole::System;
        assert!(to_api_messages(&[data, system]).is_empty());
    }

    fn sse_body() -> String {
        [
            "event: message_start\ndata: {\"message\":{\"id\":\"msg_1\",\"model\":\"claude-sonnet-4-20250514\",\"usage\":{\"input_tokens\":12,\"output_tokens\":0}}}\n\n",
            "event: content_block_start\ndata: {\"index\":0,\"content_block\":{\"type\":\"text\",\"text\":\"\"}}\n\n",
            "event: content_block_delta\ndata: {\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"Let me check \"}}\n\n",
            "event: content_block_delta\ndata: {\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"room 204.\"}}\n\n",
            "event: content_block_stop\ndata: {\"index\":0}\n\n",
            "event: content_block_start\ndata: {\"index\":1,\"content_block\":{\"type\":\"tool_use\",\"id\":\"toolu_1\",\"name\":\"getRoomInfo\",\"input\":{}}}\n\n",
            "event: content_block_delta\ndata: {\"index\":1,\"delta\":{\"type\":\"input_json_delta\",\"partial_json\":\"{\\\"roomNum\"}}\n\n",
            "event: content_block_delta\ndata: {\"index\":1,\"delta\":{\"type\":\"input_json_delta\",\"partial_json\":\"ber\\\": \\\"204\\\"}\"}}\n\n",
            "event: content_block_stop\ndata: {\"index\":1}\n\n",
            "event: message_delta\ndata: {\"delta\":{\"stop_reason\":\"tool_use\"},\"usage\":{\"input_tokens\":12,\"output_tokens\":30}}\n\n",
            "event: message_stop\ndata: {}\n\n",
        ]
        .concat()
    }

    #[tokio::test]
    async fn stream_chat_assembles_tool_calls_from_json_deltas() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_body()),
            )
            .mount(&server)
            .await;

        let client = AnthropicClient::new("key", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        let provider = AnthropicProvider::new(
            client,
            "claude-sonnet-4-20250514".into(),
            "claude-3-5-haiku-20241022".into(),
        );

        let request = ChatRequest {
            system: Some("You run hotel operations.".into()),
            messages: vec![user_message("What is room 204?")],
            tools: vec![ToolSpec {
                name: "getRoomInfo".into(),
                description: "Get a room's state".into(),
                input_schema: serde_json::json!({"type": "object"}),
            }],
            max_tokens: 1024,
        };

        let mut stream = provider.stream_chat(request).await.unwrap();
        let mut text = String::new();
        let mut tool_calls = Vec::new();
        let mut done = None;
        while let Some(event) = stream.next().await {
            match event.unwrap() {
                ProviderEvent::TextDelta(delta) => text.push_str(&delta),
                ProviderEvent::ToolCall { id, name, input } => {
                    tool_calls.push((id, name, input));
                }
                ProviderEvent::Done { stop_reason, usage } => done = Some((stop_reason, usage)),
            }
        }

        assert_eq!(text, "Let me check room 204.");
        assert_eq!(tool_calls.len(), 1);
        let (id, name, input) = &tool_calls[0];
        assert_eq!(id, "toolu_1");
        assert_eq!(name, "getRoomInfo");
        assert_eq!(input["roomNumber"], "204");

        let (stop_reason, usage) = done.expect("stream must finish with Done");
        assert_eq!(stop_reason.as_deref(), Some("tool_use"));
        assert_eq!(usage.unwrap().output_tokens, 30);
    }

    #[tokio::test]
    async fn complete_text_concatenates_text_blocks() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "msg_t",
            "content": [{"type": "text", "text": "Room 204 turnover"}],
            "model": "claude-3-5-haiku-20241022",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 8, "output_tokens": 4}
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("key", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        let provider = AnthropicProvider::new(
            client,
            "claude-sonnet-4-20250514".into(),
            "claude-3-5-haiku-20241022".into(),
        );
        let title = provider
            .complete_text("Summarize as a short title.", "what needs doing in room 204?")
            .await
            .unwrap();
        assert_eq!(title, "Room 204 turnover");
    }
}
