// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store traits for rooms/tasks, transcripts, and documents.

use async_trait::async_trait;

use crate::error::OpsError;
use crate::field::EditableField;
use crate::types::{
    ChatMessage, Conversation, Document, Room, Suggestion, Task, TaskFilter, TaskPatch,
    TaskStatus,
};

/// Read/write contract for room and task state.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn room_by_number(&self, room_number: &str) -> Result<Option<Room>, OpsError>;

    async fn room_by_id(&self, id: i64) -> Result<Option<Room>, OpsError>;

    /// All rooms, ordered by room number.
    async fn list_rooms(&self) -> Result<Vec<Room>, OpsError>;

    /// Tasks belonging to one room, newest first. The head of the list is
    /// the task that defines the room's current display attributes.
    async fn tasks_for_room(&self, room_id: i64) -> Result<Vec<Task>, OpsError>;

    async fn create_task(&self, task: &Task) -> Result<(), OpsError>;

    async fn task(&self, id: &str) -> Result<Option<Task>, OpsError>;

    /// Applies the non-`None` fields of the patch to one task.
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<(), OpsError>;

    /// Hard delete, no tombstone.
    async fn delete_task(&self, id: &str) -> Result<(), OpsError>;

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, OpsError>;

    /// Sets `field` on every task of the room inside one transaction and
    /// returns the number of rows touched (0 when the room is taskless —
    /// the caller then creates the default task).
    async fn set_field_for_room(
        &self,
        room_id: i64,
        field: EditableField,
        value: &str,
    ) -> Result<u64, OpsError>;

    /// Highest `position` in a status column, for append ordering.
    async fn max_position(&self, status: TaskStatus) -> Result<i64, OpsError>;
}

/// Append-only persistence for conversation turns.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn create_conversation(&self, conversation: &Conversation) -> Result<(), OpsError>;

    async fn conversation(&self, id: &str) -> Result<Option<Conversation>, OpsError>;

    /// Conversations owned by one principal, newest first.
    async fn conversations_for_owner(&self, owner_id: &str)
    -> Result<Vec<Conversation>, OpsError>;

    async fn save_message(&self, message: &ChatMessage) -> Result<(), OpsError>;

    /// Messages of a conversation in `created_at` order.
    async fn messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, OpsError>;

    /// Deletes the conversation and its messages.
    async fn delete_conversation(&self, id: &str) -> Result<(), OpsError>;
}

/// Persistence for generated artifact documents and their suggestions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts or replaces a document by id.
    async fn save_document(&self, document: &Document) -> Result<(), OpsError>;

    async fn document(&self, id: &str) -> Result<Option<Document>, OpsError>;

    async fn save_suggestions(&self, suggestions: &[Suggestion]) -> Result<(), OpsError>;

    async fn suggestions_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Suggestion>, OpsError>;
}
