// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Propose / apply / decline over the pending arena.

use std::str::FromStr;

use roomops_core::{
    EditableField, OpsError, Priority, Room, RoomStore, Task, TaskStatus,
};
use tracing::info;
use uuid::Uuid;

use crate::arena::PendingArena;
use crate::pending::{PendingUpdate, UpdateOutcome};

/// Validates a proposed change and parks it behind a token.
///
/// The field name is parsed before anything else; an unknown field fails
/// without touching the store. The value is normalized and checked against
/// the field's catalogue here, so a token in the arena is always applicable.
pub async fn propose(
    store: &dyn RoomStore,
    arena: &PendingArena,
    room_number: &str,
    field_name: &str,
    value: &str,
) -> Result<PendingUpdate, OpsError> {
    let field = EditableField::parse(field_name)?;

    let room = store
        .room_by_number(room_number)
        .await?
        .ok_or_else(|| OpsError::room_not_found(room_number))?;

    let normalized = field.normalize(value);
    field.check_value(&normalized)?;

    let tasks = store.tasks_for_room(room.id).await?;
    let current_value = tasks.first().and_then(|task| value_of(field, task));

    let pending = arena.mint(PendingUpdate {
        token: String::new(),
        room_id: room.id,
        room_number: room.room_number.clone(),
        field,
        current_value,
        proposed_value: normalized,
        created_at: chrono::Utc::now().to_rfc3339(),
    });
    info!(room = %pending.room_number, field = %field, "update proposed");
    Ok(pending)
}

/// Redeems a token and applies the parked change.
///
/// The value is re-checked before the fan-out write. When the room has no
/// tasks, a default task is created to carry the value instead.
pub async fn apply(
    store: &dyn RoomStore,
    arena: &PendingArena,
    token: &str,
) -> Result<UpdateOutcome, OpsError> {
    let pending = arena.redeem(token).ok_or(OpsError::NotFound {
        kind: "pending update",
        id: token.to_string(),
    })?;

    pending.field.check_value(&pending.proposed_value)?;

    let room = store
        .room_by_id(pending.room_id)
        .await?
        .ok_or_else(|| OpsError::room_not_found(&pending.room_number))?;

    let updated = store
        .set_field_for_room(room.id, pending.field, &pending.proposed_value)
        .await?;

    if updated > 0 {
        info!(
            room = %pending.room_number,
            field = %pending.field,
            value = %pending.proposed_value,
            updated,
            "update applied"
        );
        return Ok(UpdateOutcome {
            room_number: pending.room_number,
            field: pending.field,
            value: pending.proposed_value,
            updated_tasks: updated,
            created_task: false,
        });
    }

    let task = default_task(&room, pending.field, &pending.proposed_value, store).await?;
    store.create_task(&task).await?;
    info!(
        room = %pending.room_number,
        field = %pending.field,
        value = %pending.proposed_value,
        "update applied to new default task"
    );
    Ok(UpdateOutcome {
        room_number: pending.room_number,
        field: pending.field,
        value: pending.proposed_value,
        updated_tasks: 1,
        created_task: true,
    })
}

/// Drops a pending update without applying it. Unknown or already-consumed
/// tokens are treated as already declined.
pub fn decline(arena: &PendingArena, token: &str) {
    if arena.discard(token) {
        info!(%token, "update declined");
    }
}

/// The value the room currently shows for a field, read off its latest task.
fn value_of(field: EditableField, task: &Task) -> Option<String> {
    match field {
        EditableField::RoomType => Some(task.room_type.to_string()),
        EditableField::Priority => Some(task.priority.to_string()),
        EditableField::Status => Some(task.status.to_string()),
        EditableField::RoomStatus => task.room_status.clone(),
        EditableField::Linen => task.linen.clone(),
        EditableField::CheckInTime => task.check_in.clone(),
        EditableField::CheckOutTime => task.check_out.clone(),
    }
}

/// Builds the default task for a taskless room, with the confirmed field
/// already set.
async fn default_task(
    room: &Room,
    field: EditableField,
    value: &str,
    store: &dyn RoomStore,
) -> Result<Task, OpsError> {
    let mut task = Task {
        id: Uuid::new_v4().to_string(),
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
        position: 0,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    // check_value already guaranteed these parses succeed.
    match field {
        EditableField::Status => {
            task.status = TaskStatus::from_str(value)
                .map_err(|_| OpsError::Validation(format!("{value:?} is not a valid status")))?;
        }
        EditableField::Priority => {
            task.priority = Priority::from_str(value)
                .map_err(|_| OpsError::Validation(format!("{value:?} is not a valid priority")))?;
        }
        EditableField::RoomType => {
            task.room_type = roomops_core::RoomType::from_str(value)
                .map_err(|_| OpsError::Validation(format!("{value:?} is not a valid room type")))?;
        }
        EditableField::RoomStatus => task.room_status = Some(value.to_string()),
        EditableField::Linen => task.linen = Some(value.to_string()),
        EditableField::CheckInTime => task.check_in = Some(value.to_string()),
        EditableField::CheckOutTime => task.check_out = Some(value.to_string()),
    }

    task.position = store.max_position(task.status).await? + 1000;
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use roomops_core::{RoomType, TaskFilter};
    use roomops_store::SqliteStore;
    use tempfile::tempdir;

    async fn setup() -> (SqliteStore, PendingArena, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confirm.db");
        let store = SqliteStore::open(path.to_str().unwrap()).await.unwrap();
        let arena = PendingArena::new(Duration::from_secs(600));
        (store, arena, dir)
    }

    fn make_task(id: &str, room: &Room, created_at: &str) -> Task {
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
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn propose_does_not_write() {
        let (store, arena, _dir) = setup().await;
        let room = store.create_room("101", RoomType::Standard).await.unwrap();
        store
            .create_task(&make_task("t1", &room, "2026-01-01T00:00:00Z"))
            .await
            .unwrap();

        let pending = propose(&store, &arena, "101", "Status", "in progress")
            .await
            .unwrap();
        assert_eq!(pending.proposed_value, "IN_PROGRESS");
        assert_eq!(pending.current_value.as_deref(), Some("TODO"));

        // The store is untouched until the token is redeemed.
        let task = store.task("t1").await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn invalid_field_fails_before_room_lookup() {
        let (store, arena, _dir) = setup().await;
        let err = propose(&store, &arena, "101", "Minibar", "stocked")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::InvalidField(ref name) if name == "Minibar"));
        assert!(arena.is_empty());
    }

    #[tokio::test]
    async fn invalid_value_is_rejected_at_propose() {
        let (store, arena, _dir) = setup().await;
        store.create_room("101", RoomType::Standard).await.unwrap();
        let err = propose(&store, &arena, "101", "Priority", "urgent")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::Validation(_)));
        assert!(arena.is_empty());
    }

    #[tokio::test]
    async fn apply_fans_out_to_all_room_tasks_only() {
        let (store, arena, _dir) = setup().await;
        let room_a = store.create_room("101", RoomType::Standard).await.unwrap();
        let room_b = store.create_room("102", RoomType::Standard).await.unwrap();
        store
            .create_task(&make_task("a1", &room_a, "2026-01-01T00:00:00Z"))
            .await
            .unwrap();
        store
            .create_task(&make_task("a2", &room_a, "2026-01-01T00:00:01Z"))
            .await
            .unwrap();
        store
            .create_task(&make_task("b1", &room_b, "2026-01-01T00:00:00Z"))
            .await
            .unwrap();

        let pending = propose(&store, &arena, "101", "Priority", "high")
            .await
            .unwrap();
        let outcome = apply(&store, &arena, &pending.token).await.unwrap();
        assert_eq!(outcome.updated_tasks, 2);
        assert!(!outcome.created_task);

        for id in ["a1", "a2"] {
            let task = store.task(id).await.unwrap().unwrap();
            assert_eq!(task.priority, Priority::High);
        }
        let untouched = store.task("b1").await.unwrap().unwrap();
        assert_eq!(untouched.priority, Priority::Medium);
    }

    #[tokio::test]
    async fn apply_creates_default_task_for_taskless_room() {
        let (store, arena, _dir) = setup().await;
        store.create_room("305", RoomType::Suite).await.unwrap();

        let pending = propose(&store, &arena, "305", "Status", "done")
            .await
            .unwrap();
        let outcome = apply(&store, &arena, &pending.token).await.unwrap();
        assert!(outcome.created_task);
        assert_eq!(outcome.updated_tasks, 1);

        let tasks = store
            .list_tasks(&TaskFilter {
                room_id: None,
                status: Some(TaskStatus::Done),
                priority: None,
                assignee_id: None,
            })
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Room 305 maintenance");
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].room_number, "305");
    }

    #[tokio::test]
    async fn token_is_single_use() {
        let (store, arena, _dir) = setup().await;
        store.create_room("101", RoomType::Standard).await.unwrap();

        let pending = propose(&store, &arena, "101", "Linen", "yes").await.unwrap();
        apply(&store, &arena, &pending.token).await.unwrap();

        let err = apply(&store, &arena, &pending.token).await.unwrap_err();
        assert!(matches!(err, OpsError::NotFound { kind: "pending update", .. }));
    }

    #[tokio::test]
    async fn expired_token_cannot_apply() {
        let (store, _arena, _dir) = setup().await;
        let arena = PendingArena::new(Duration::ZERO);
        store.create_room("101", RoomType::Standard).await.unwrap();

        let pending = propose(&store, &arena, "101", "Linen", "yes").await.unwrap();
        let err = apply(&store, &arena, &pending.token).await.unwrap_err();
        assert!(matches!(err, OpsError::NotFound { kind: "pending update", .. }));
    }

    #[tokio::test]
    async fn declined_token_cannot_apply() {
        let (store, arena, _dir) = setup().await;
        store.create_room("101", RoomType::Standard).await.unwrap();

        let pending = propose(&store, &arena, "101", "Room Status", "stay over")
            .await
            .unwrap();
        decline(&arena, &pending.token);

        let err = apply(&store, &arena, &pending.token).await.unwrap_err();
        assert!(matches!(err, OpsError::NotFound { .. }));
    }
}
