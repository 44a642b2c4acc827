// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for the backing language model.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;
use serde::{Deserialize, Serialize};

use crate::error::OpsError;
use crate::types::{ChatMessage, TokenUsage};

/// A tool definition exposed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Wire name the model invokes the tool by.
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's input.
    pub input_schema: serde_json::Value,
}

/// One model generation request: transcript so far plus the gated tool set.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolSpec>,
    pub max_tokens: u32,
}

/// Incremental output from a streaming generation.
///
/// Tool-call input arrives from the wire as partial JSON fragments; the
/// provider adapter assembles them and emits one complete `ToolCall` per
/// requested invocation.
#[derive(Debug, Clone)]
pub enum ProviderEvent {
    /// A chunk of assistant text.
    TextDelta(String),
    /// The model requests a tool invocation.
    ToolCall {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Generation finished. `stop_reason` is the provider's token
    /// ("end_turn", "tool_use", "max_tokens", ...).
    Done {
        stop_reason: Option<String>,
        usage: Option<TokenUsage>,
    },
}

/// Boxed stream of provider events.
pub type ProviderEventStream =
    Pin<Box<dyn Stream<Item = Result<ProviderEvent, OpsError>> + Send>>;

/// The seam in front of the language-model API.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Starts a streaming generation.
    async fn stream_chat(&self, request: ChatRequest) -> Result<ProviderEventStream, OpsError>;

    /// One-shot, non-streaming completion. Used for title synthesis.
    async fn complete_text(&self, system: &str, prompt: &str) -> Result<String, OpsError>;
}
