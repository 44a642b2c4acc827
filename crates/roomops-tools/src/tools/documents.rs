// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document generation tools. Content comes from the provider; text deltas
//! are forwarded to the progress channel while generation runs, and the
//! finished artifact is persisted.

use std::str::FromStr;

use futures::StreamExt;
use roomops_core::{
    ChatMessage, ChatRequest, ChatRole, Document, DocumentKind, MessagePart, OpsError,
    ProviderEvent, Suggestion, ToolSpec,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::context::ToolContext;
use crate::output::{ToolOutput, ToolProgress};
use crate::tools::parse_input;

const GENERATION_MAX_TOKENS: u32 = 4096;

// --- createDocument ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateDocumentInput {
    title: String,
    /// "text", "code", or "sheet". Defaults to text.
    kind: Option<String>,
}

pub(crate) fn create_document_spec() -> ToolSpec {
    ToolSpec {
        name: "createDocument".to_string(),
        description: "Create a document (checklist, report, note) generated from a title. \
                      Content streams to the client while it is written."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "What the document is about" },
                "kind": { "type": "string", "enum": ["text", "code", "sheet"] }
            },
            "required": ["title"]
        }),
    }
}

pub(crate) async fn create_document(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: CreateDocumentInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let kind = match input.kind.as_deref() {
        None => DocumentKind::Text,
        Some(raw) => match DocumentKind::from_str(raw) {
            Ok(kind) => kind,
            Err(_) => return ToolOutput::error(format!("{raw:?} is not a valid document kind")),
        },
    };

    let document_id = Uuid::new_v4().to_string();
    ctx.emit(ToolProgress::DocumentStart {
        document_id: document_id.clone(),
        title: input.title.clone(),
        kind,
    })
    .await;

    let content = match generate(ctx, &document_id, system_for(kind), &input.title).await {
        Ok(content) => content,
        Err(e) => return ToolOutput::error(e),
    };

    let document = Document {
        id: document_id.clone(),
        title: input.title,
        kind,
        content,
        owner_id: ctx.principal.user_id.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    if let Err(e) = ctx.documents.save_document(&document).await {
        return ToolOutput::error(e);
    }
    ctx.emit(ToolProgress::DocumentFinish {
        document_id: document_id.clone(),
    })
    .await;

    ToolOutput::json(&json!({
        "documentId": document_id,
        "title": document.title,
        "kind": document.kind.to_string(),
        "message": "Document created.",
    }))
}

// --- updateDocument ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateDocumentInput {
    document_id: String,
    /// What to change.
    description: String,
}

pub(crate) fn update_document_spec() -> ToolSpec {
    ToolSpec {
        name: "updateDocument".to_string(),
        description: "Rewrite an existing document per a change description.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "documentId": { "type": "string", "description": "Document id" },
                "description": { "type": "string", "description": "The change to make" }
            },
            "required": ["documentId", "description"]
        }),
    }
}

pub(crate) async fn update_document(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: UpdateDocumentInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let mut document = match ctx.documents.document(&input.document_id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return ToolOutput::error(format!("document {} not found", input.document_id));
        }
        Err(e) => return ToolOutput::error(e),
    };

    ctx.emit(ToolProgress::DocumentStart {
        document_id: document.id.clone(),
        title: document.title.clone(),
        kind: document.kind,
    })
    .await;

    let prompt = format!(
        "Rewrite the following document applying this change: {}\n\n{}",
        input.description, document.content
    );
    let content = match generate(ctx, &document.id, system_for(document.kind), &prompt).await {
        Ok(content) => content,
        Err(e) => return ToolOutput::error(e),
    };

    document.content = content;
    if let Err(e) = ctx.documents.save_document(&document).await {
        return ToolOutput::error(e);
    }
    ctx.emit(ToolProgress::DocumentFinish {
        document_id: document.id.clone(),
    })
    .await;

    ToolOutput::json(&json!({
        "documentId": document.id,
        "title": document.title,
        "message": "Document updated.",
    }))
}

// --- requestSuggestions ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RequestSuggestionsInput {
    document_id: String,
}

pub(crate) fn request_suggestions_spec() -> ToolSpec {
    ToolSpec {
        name: "requestSuggestions".to_string(),
        description: "Generate edit suggestions for a document and store them.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "documentId": { "type": "string", "description": "Document id" }
            },
            "required": ["documentId"]
        }),
    }
}

/// The shape suggestions come back from the provider in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    original_text: String,
    suggested_text: String,
    description: Option<String>,
}

pub(crate) async fn request_suggestions(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: RequestSuggestionsInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let document = match ctx.documents.document(&input.document_id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return ToolOutput::error(format!("document {} not found", input.document_id));
        }
        Err(e) => return ToolOutput::error(e),
    };

    let system = "You review hotel operations documents. Reply with a JSON array only. \
                  Each element: {\"originalText\": string, \"suggestedText\": string, \
                  \"description\": string}.";
    let reply = match ctx.provider.complete_text(system, &document.content).await {
        Ok(reply) => reply,
        Err(e) => return ToolOutput::error(e),
    };
    let raw: Vec<RawSuggestion> = match serde_json::from_str(reply.trim()) {
        Ok(raw) => raw,
        Err(e) => return ToolOutput::error(format!("provider returned unusable suggestions: {e}")),
    };

    let now = chrono::Utc::now().to_rfc3339();
    let mut suggestions = Vec::with_capacity(raw.len());
    for item in raw {
        let suggestion = Suggestion {
            id: Uuid::new_v4().to_string(),
            document_id: document.id.clone(),
            original_text: item.original_text,
            suggested_text: item.suggested_text,
            description: item.description,
            created_at: now.clone(),
        };
        ctx.emit(ToolProgress::SuggestionReady {
            document_id: document.id.clone(),
            suggestion_id: suggestion.id.clone(),
            description: suggestion.description.clone(),
        })
        .await;
        suggestions.push(suggestion);
    }
    if let Err(e) = ctx.documents.save_suggestions(&suggestions).await {
        return ToolOutput::error(e);
    }

    ToolOutput::json(&json!({
        "documentId": document.id,
        "count": suggestions.len(),
        "message": "Suggestions ready.",
    }))
}

// --- helpers ---

fn system_for(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Text => {
            "Write a clear, well-structured document for hotel operations staff. \
             Markdown, no preamble."
        }
        DocumentKind::Code => "Write only the code requested. No prose around it.",
        DocumentKind::Sheet => {
            "Produce CSV data for the request. Header row first, no prose around it."
        }
    }
}

/// Streams a generation, forwarding each text delta to the progress channel,
/// and returns the accumulated content.
async fn generate(
    ctx: &ToolContext,
    document_id: &str,
    system: &str,
    prompt: &str,
) -> Result<String, OpsError> {
    let request = ChatRequest {
        system: Some(system.to_string()),
        messages: vec![ChatMessage {
            id: Uuid::new_v4().to_string(),
            conversation_id: String::new(),
            role: ChatRole::User,
            parts: vec![MessagePart::Text {
                text: prompt.to_string(),
            }],
            content: prompt.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }],
        tools: Vec::new(),
        max_tokens: GENERATION_MAX_TOKENS,
    };

    let mut stream = ctx.provider.stream_chat(request).await?;
    let mut content = String::new();
    while let Some(event) = stream.next().await {
        match event? {
            ProviderEvent::TextDelta(delta) => {
                ctx.emit(ToolProgress::DocumentDelta {
                    document_id: document_id.to_string(),
                    delta: delta.clone(),
                })
                .await;
                content.push_str(&delta);
            }
            ProviderEvent::ToolCall { .. } => {}
            ProviderEvent::Done { .. } => break,
        }
    }
    Ok(content)
}
