// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-turn pipeline.

use std::pin::pin;
use std::sync::Arc;

use futures::StreamExt;
use roomops_confirm::PendingArena;
use roomops_core::{
    ChatMessage, ChatProvider, ChatRequest, ChatRole, Conversation, DocumentStore, MessagePart,
    OpsError, Principal, ProviderEvent, RoomStore, TranscriptStore,
};
use roomops_tools::{ModelProfile, ToolContext, ToolRegistry};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::events::TurnEvent;
use crate::title::synthesize_title;

const DEFAULT_SYSTEM_PROMPT: &str = "You are the operations assistant for a hotel housekeeping \
    dashboard. You answer questions about rooms and tasks and make changes through your tools. \
    Any change to room data must go through the propose-then-confirm flow; never claim a change \
    happened before it was confirmed.";

/// Turn pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub system_prompt: String,
    /// Upper bound on sequential tool rounds within one turn.
    pub max_tool_rounds: u32,
    pub max_tokens: u32,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_rounds: 5,
            max_tokens: 4096,
        }
    }
}

/// One incoming user turn: the principal, the target conversation, and the
/// client's transcript including the newest user message.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub principal: Principal,
    pub conversation_id: String,
    pub messages: Vec<ChatMessage>,
    pub profile: ModelProfile,
}

#[derive(Clone)]
pub struct Orchestrator {
    provider: Arc<dyn ChatProvider>,
    transcripts: Arc<dyn TranscriptStore>,
    rooms: Arc<dyn RoomStore>,
    documents: Arc<dyn DocumentStore>,
    pending: Arc<PendingArena>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        transcripts: Arc<dyn TranscriptStore>,
        rooms: Arc<dyn RoomStore>,
        documents: Arc<dyn DocumentStore>,
        pending: Arc<PendingArena>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            provider,
            transcripts,
            rooms,
            documents,
            pending,
            options,
        }
    }

    /// Runs one turn in a background task, streaming [`TurnEvent`]s to the
    /// returned receiver. A failure surfaces as a terminal `Error` event;
    /// output flushed before the failure stands.
    pub fn handle_turn(&self, request: TurnRequest) -> mpsc::Receiver<TurnEvent> {
        let (tx, rx) = mpsc::channel(64);
        let this = self.clone();
        tokio::spawn(async move {
            if let Err(e) = this.run_turn(request, &tx).await {
                warn!(error = %e, "turn failed");
                let _ = tx
                    .send(TurnEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
            }
        });
        rx
    }

    async fn run_turn(
        &self,
        request: TurnRequest,
        tx: &mpsc::Sender<TurnEvent>,
    ) -> Result<(), OpsError> {
        let TurnRequest {
            principal,
            conversation_id,
            messages,
            profile,
        } = request;

        // Ownership check before anything else touches the transcript.
        let existing = self.transcripts.conversation(&conversation_id).await?;
        if let Some(conversation) = &existing {
            if conversation.owner_id != principal.user_id {
                return Err(OpsError::Unauthorized);
            }
        }

        let user_message = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .cloned()
            .ok_or_else(|| OpsError::Validation("no user message in request".to_string()))?;
        let user_text = effective_text(&user_message);

        if existing.is_none() {
            let title = synthesize_title(self.provider.as_ref(), &user_text).await;
            self.transcripts
                .create_conversation(&Conversation {
                    id: conversation_id.clone(),
                    title,
                    owner_id: principal.user_id.clone(),
                    created_at: chrono::Utc::now().to_rfc3339(),
                })
                .await?;
            info!(conversation = %conversation_id, "conversation created");
        }

        // The user message is durable before any model output streams; a
        // failure here aborts the turn.
        let user_message = ChatMessage {
            id: if user_message.id.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                user_message.id.clone()
            },
            conversation_id: conversation_id.clone(),
            role: ChatRole::User,
            parts: user_message.parts.clone(),
            content: user_text.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.transcripts.save_message(&user_message).await?;

        let (progress_tx, mut progress_rx) = mpsc::channel(64);
        let ctx = ToolContext::new(
            principal.clone(),
            self.rooms.clone(),
            self.documents.clone(),
            self.provider.clone(),
            self.pending.clone(),
            progress_tx,
        );
        let specs = ToolRegistry::specs(profile);

        let mut api_messages = messages;
        let mut parts: Vec<MessagePart> = Vec::new();

        for round in 0..self.options.max_tool_rounds {
            let mut stream = self
                .provider
                .stream_chat(ChatRequest {
                    system: Some(self.options.system_prompt.clone()),
                    messages: api_messages.clone(),
                    tools: specs.clone(),
                    max_tokens: self.options.max_tokens,
                })
                .await?;

            let mut round_text = String::new();
            let mut tool_calls = Vec::new();
            while let Some(event) = stream.next().await {
                match event? {
                    ProviderEvent::TextDelta(delta) => {
                        round_text.push_str(&delta);
                        let _ = tx.send(TurnEvent::TextDelta { delta }).await;
                    }
                    ProviderEvent::ToolCall { id, name, input } => {
                        tool_calls.push((id, name, input));
                    }
                    ProviderEvent::Done { stop_reason, usage } => {
                        debug!(round, ?stop_reason, ?usage, "generation round finished");
                    }
                }
            }

            if round > 0 {
                parts.push(MessagePart::StepStart);
            }
            let mut round_parts = Vec::new();
            if !round_text.is_empty() {
                round_parts.push(MessagePart::Text {
                    text: round_text.clone(),
                });
            }

            if tool_calls.is_empty() {
                parts.extend(round_parts);
                break;
            }

            for (id, name, input) in tool_calls {
                let _ = tx
                    .send(TurnEvent::ToolCall {
                        tool_call_id: id.clone(),
                        tool_name: name.clone(),
                        input: input.clone(),
                    })
                    .await;
                round_parts.push(MessagePart::ToolCall {
                    tool_call_id: id.clone(),
                    tool_name: name.clone(),
                    input: input.clone(),
                });

                let output = self
                    .dispatch_with_progress(&ctx, profile, &name, input, &mut progress_rx, tx)
                    .await;

                let output_value: serde_json::Value = serde_json::from_str(&output.content)
                    .unwrap_or_else(|_| serde_json::Value::String(output.content.clone()));
                let _ = tx
                    .send(TurnEvent::ToolResult {
                        tool_call_id: id.clone(),
                        output: output_value.clone(),
                        is_error: output.is_error,
                    })
                    .await;
                round_parts.push(MessagePart::ToolResult {
                    tool_call_id: id,
                    output: output_value,
                    is_error: output.is_error,
                });
            }

            parts.extend(round_parts.clone());

            // Feed the round back so the next generation sees its tool
            // results.
            api_messages.push(ChatMessage {
                id: Uuid::new_v4().to_string(),
                conversation_id: conversation_id.clone(),
                role: ChatRole::Assistant,
                parts: round_parts,
                content: round_text,
                created_at: chrono::Utc::now().to_rfc3339(),
            });

            if round + 1 == self.options.max_tool_rounds {
                debug!("tool round budget exhausted");
            }
        }

        let assistant_message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.clone(),
            role: ChatRole::Assistant,
            content: ChatMessage::flatten_parts(&parts),
            parts,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        // The client already has the full turn; a failed save loses replay
        // history but must not fail a delivered response.
        if let Err(e) = self.transcripts.save_message(&assistant_message).await {
            warn!(error = %e, message = %assistant_message.id, "failed to persist assistant message");
        }

        let _ = tx
            .send(TurnEvent::Finished {
                conversation_id,
                message_id: assistant_message.id,
            })
            .await;
        Ok(())
    }

    /// Runs one tool while forwarding its progress events live, then drains
    /// anything still queued so progress lands before the tool's result.
    async fn dispatch_with_progress(
        &self,
        ctx: &ToolContext,
        profile: ModelProfile,
        name: &str,
        input: serde_json::Value,
        progress_rx: &mut mpsc::Receiver<roomops_tools::ToolProgress>,
        tx: &mpsc::Sender<TurnEvent>,
    ) -> roomops_tools::ToolOutput {
        let mut dispatch = pin!(ToolRegistry::dispatch(ctx, profile, name, input));
        let output = loop {
            tokio::select! {
                output = &mut dispatch => break output,
                Some(event) = progress_rx.recv() => {
                    let _ = tx.send(TurnEvent::Progress { event }).await;
                }
            }
        };
        while let Ok(event) = progress_rx.try_recv() {
            let _ = tx.send(TurnEvent::Progress { event }).await;
        }
        output
    }
}

/// The text of a message: flattened parts, falling back to the legacy
/// content mirror.
fn effective_text(message: &ChatMessage) -> String {
    let text = ChatMessage::flatten_parts(&message.parts);
    if text.is_empty() {
        message.content.clone()
    } else {
        text
    }
}
