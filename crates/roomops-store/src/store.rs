// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`SqliteStore`] implements the core store traits over one [`Database`].

use async_trait::async_trait;
use roomops_core::{
    ChatMessage, Conversation, Document, DocumentStore, EditableField, OpsError, Room, RoomStore,
    RoomType, Suggestion, Task, TaskFilter, TaskPatch, TaskStatus, TranscriptStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store. Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and runs migrations.
    pub async fn open(path: &str) -> Result<Self, OpsError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates a room row, failing on duplicate room numbers.
    pub async fn create_room(
        &self,
        room_number: &str,
        room_type: RoomType,
    ) -> Result<Room, OpsError> {
        queries::rooms::create_room(&self.db, room_number, room_type).await
    }

    pub async fn close(self) -> Result<(), OpsError> {
        self.db.close().await
    }
}

#[async_trait]
impl RoomStore for SqliteStore {
    async fn room_by_number(&self, room_number: &str) -> Result<Option<Room>, OpsError> {
        queries::rooms::room_by_number(&self.db, room_number).await
    }

    async fn room_by_id(&self, id: i64) -> Result<Option<Room>, OpsError> {
        queries::rooms::room_by_id(&self.db, id).await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, OpsError> {
        queries::rooms::list_rooms(&self.db).await
    }

    async fn tasks_for_room(&self, room_id: i64) -> Result<Vec<Task>, OpsError> {
        queries::tasks::tasks_for_room(&self.db, room_id).await
    }

    async fn create_task(&self, task: &Task) -> Result<(), OpsError> {
        queries::tasks::create_task(&self.db, task).await
    }

    async fn task(&self, id: &str) -> Result<Option<Task>, OpsError> {
        queries::tasks::task_by_id(&self.db, id).await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<(), OpsError> {
        queries::tasks::update_task(&self.db, id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), OpsError> {
        let affected = queries::tasks::delete_task(&self.db, id).await?;
        if affected == 0 {
            return Err(OpsError::NotFound {
                kind: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, OpsError> {
        queries::tasks::list_tasks(&self.db, filter).await
    }

    async fn set_field_for_room(
        &self,
        room_id: i64,
        field: EditableField,
        value: &str,
    ) -> Result<u64, OpsError> {
        queries::tasks::set_field_for_room(&self.db, room_id, field, value).await
    }

    async fn max_position(&self, status: TaskStatus) -> Result<i64, OpsError> {
        queries::tasks::max_position(&self.db, status).await
    }
}

#[async_trait]
impl TranscriptStore for SqliteStore {
    async fn create_conversation(&self, conversation: &Conversation) -> Result<(), OpsError> {
        queries::conversations::create_conversation(&self.db, conversation).await
    }

    async fn conversation(&self, id: &str) -> Result<Option<Conversation>, OpsError> {
        queries::conversations::conversation_by_id(&self.db, id).await
    }

    async fn conversations_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<Conversation>, OpsError> {
        queries::conversations::conversations_for_owner(&self.db, owner_id).await
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), OpsError> {
        queries::messages::insert_message(&self.db, message).await
    }

    async fn messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, OpsError> {
        queries::messages::messages_for_conversation(&self.db, conversation_id).await
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), OpsError> {
        queries::conversations::delete_conversation(&self.db, id).await
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn save_document(&self, document: &Document) -> Result<(), OpsError> {
        queries::documents::save_document(&self.db, document).await
    }

    async fn document(&self, id: &str) -> Result<Option<Document>, OpsError> {
        queries::documents::document_by_id(&self.db, id).await
    }

    async fn save_suggestions(&self, suggestions: &[Suggestion]) -> Result<(), OpsError> {
        queries::documents::save_suggestions(&self.db, suggestions).await
    }

    async fn suggestions_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Suggestion>, OpsError> {
        queries::documents::suggestions_for_document(&self.db, document_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomops_core::Priority;
    use tempfile::tempdir;

    async fn setup_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = SqliteStore::open(path.to_str().unwrap()).await.unwrap();
        (store, dir)
    }

    fn make_task(id: &str, room: &Room) -> Task {
        Task {
            id: id.to_string(),
            room_id: room.id,
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            name: format!("Room {} maintenance", room.room_number),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            room_status: None,
            linen: None,
            check_in: None,
            check_out: None,
            assignee_id: None,
            assignee_name: None,
            due_date: None,
            description: None,
            position: 1000,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn delete_task_missing_is_not_found() {
        let (store, _dir) = setup_store().await;
        let err = RoomStore::delete_task(&store, "no-such-task")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::NotFound { kind: "task", .. }));
    }

    #[tokio::test]
    async fn delete_task_removes_row() {
        let (store, _dir) = setup_store().await;
        let room = store.create_room("101", RoomType::Standard).await.unwrap();
        RoomStore::create_task(&store, &make_task("t1", &room))
            .await
            .unwrap();

        RoomStore::delete_task(&store, "t1").await.unwrap();
        assert!(RoomStore::task(&store, "t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn traits_share_one_database() {
        let (store, _dir) = setup_store().await;
        let room = store.create_room("204", RoomType::Deluxe).await.unwrap();
        RoomStore::create_task(&store, &make_task("t1", &room))
            .await
            .unwrap();

        let conversation = Conversation {
            id: "c1".to_string(),
            title: "Room 204 status".to_string(),
            owner_id: "user-1".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };
        TranscriptStore::create_conversation(&store, &conversation)
            .await
            .unwrap();

        assert_eq!(RoomStore::tasks_for_room(&store, room.id).await.unwrap().len(), 1);
        assert!(
            TranscriptStore::conversation(&store, "c1")
                .await
                .unwrap()
                .is_some()
        );
    }
}
