// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain and transcript types shared across the workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The authenticated principal attached to a request.
///
/// Passed explicitly into every component that needs it (orchestrator,
/// tool context) rather than looked up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable user identifier.
    pub user_id: String,
    /// Display name, when known.
    pub name: Option<String>,
}

// --- Rooms and tasks ---

/// Room type catalogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    President,
}

/// Task status catalogue.
///
/// A single closed enum holding the union of both variant sets observed in
/// the wild: the six primary statuses the tools document to the model, plus
/// four legacy statuses still present in stored rows. Which subset survives
/// a future migration is an owner decision; until then, nothing persisted
/// is unrepresentable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    OutOfService,
    DoNotDisturb,
    ReadyForInspection,
    // Legacy variants.
    Backlog,
    InReview,
    OutOfOrder,
    PickUp,
}

impl TaskStatus {
    /// True for statuses counted as "active" in floor aggregations.
    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::Todo | TaskStatus::InProgress)
    }
}

/// Task priority catalogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A physical hotel unit. Operational display attributes (priority, status,
/// linen, check-in/out, assignee, due date) live on the room's tasks, not
/// here; the "current" attributes are those of the latest-created task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Row id, referenced by tasks.
    pub id: i64,
    /// Unique, stable room number. Kept as a string: the leading digit
    /// carries the floor and numbers may be zero-padded.
    pub room_number: String,
    pub room_type: RoomType,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A unit of cleaning or maintenance work tied to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub room_id: i64,
    /// Denormalized copies of the room's fields at creation time.
    pub room_number: String,
    pub room_type: RoomType,
    pub name: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Occupancy state (e.g. STAYOVER, DEPARTURE). Normalized free text.
    pub room_status: Option<String>,
    /// Linen state (e.g. YES, NO). Normalized free text.
    pub linen: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    /// Ordering within a status column.
    pub position: i64,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A partial update to a single task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub position: Option<i64>,
}

impl TaskPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.assignee_name.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
            && self.position.is_none()
    }
}

/// Filter criteria for task listings. Provided predicates are ANDed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    pub room_id: Option<i64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<String>,
}

// --- Conversations and messages ---

/// Role of a transcript message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
    Data,
}

/// One typed segment of a transcript message.
///
/// `parts` is the source of truth for replay; a tool-call part and its
/// tool-result part share a `tool_call_id` and reconcile 1:1 within a
/// completed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum MessagePart {
    Text {
        text: String,
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
    Reasoning {
        text: String,
    },
    StepStart,
}

/// A conversation between one owner and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    /// Derived from the first user message; defaulted when title
    /// generation fails.
    pub title: String,
    pub owner_id: String,
    pub created_at: String,
}

/// A persisted transcript message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: ChatRole,
    /// Ordered typed parts; authoritative.
    pub parts: Vec<MessagePart>,
    /// Legacy flattened text mirror. Kept for backward compatibility and
    /// must not be treated as authoritative by new code.
    pub content: String,
    pub created_at: String,
}

impl ChatMessage {
    /// Flattens the text parts into the legacy `content` mirror.
    pub fn flatten_parts(parts: &[MessagePart]) -> String {
        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        texts.join("\n")
    }
}

// --- Documents and suggestions ---

/// Artifact kind for non-task documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Code,
    Sheet,
}

/// A generated artifact document, orthogonal to the room/task domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
    pub content: String,
    pub owner_id: String,
    pub created_at: String,
}

/// A suggested edit against a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub document_id: String,
    pub original_text: String,
    pub suggested_text: String,
    pub description: Option<String>,
    pub created_at: String,
}

// --- Provider usage ---

/// Token usage reported by the provider, for logging.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
