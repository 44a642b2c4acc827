// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Roomops hotel-operations assistant.
//!
//! This crate provides the foundational types shared across the workspace:
//! the error taxonomy, the room/task domain model, chat transcript types
//! with structured message parts, the editable-field catalogue with its
//! normalization rules, and the async trait seams behind which the SQLite
//! store and the LLM provider live.

pub mod error;
pub mod field;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OpsError;
pub use field::EditableField;
pub use traits::{
    ChatProvider, ChatRequest, DocumentStore, ProviderEvent, ProviderEventStream, RoomStore,
    ToolSpec, TranscriptStore,
};
pub use types::{
    ChatMessage, ChatRole, Conversation, Document, DocumentKind, MessagePart, Priority,
    Principal, Room, RoomType, Suggestion, Task, TaskFilter, TaskPatch, TaskStatus, TokenUsage,
};
