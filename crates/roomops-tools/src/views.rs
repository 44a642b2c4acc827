// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side room views, shared between the model-facing tools and the
//! gateway's REST endpoints.

use std::collections::BTreeMap;

use roomops_core::{OpsError, Room, RoomStore, Task, TaskStatus};
use serde_json::json;

use crate::tools::display_value;

/// One room's snapshot plus its full task list.
pub async fn room_overview(
    rooms: &dyn RoomStore,
    room_number: &str,
) -> Result<serde_json::Value, OpsError> {
    let room = rooms
        .room_by_number(room_number)
        .await?
        .ok_or_else(|| OpsError::room_not_found(room_number))?;
    let tasks = rooms.tasks_for_room(room.id).await?;
    Ok(room_payload(&room, &tasks))
}

/// Snapshot merged from the latest task, with the task list attached.
pub fn room_payload(room: &Room, tasks: &[Task]) -> serde_json::Value {
    let mut value = snapshot(room, tasks);
    value["tasks"] = serde_json::Value::Array(tasks.iter().map(task_json).collect());
    value
}

/// Per-floor task counts, one entry per floor in ascending order.
///
/// The floor of a room is the leading digit of its room number; rooms with
/// non-numeric numbers are skipped. `floor` restricts to one floor.
pub async fn floor_overview(
    rooms: &dyn RoomStore,
    floor: Option<u32>,
) -> Result<Vec<serde_json::Value>, OpsError> {
    let mut sorted = rooms.list_rooms().await?;
    sorted.sort_by_key(|room| numeric_key(&room.room_number));

    let mut floors: BTreeMap<u32, Vec<serde_json::Value>> = BTreeMap::new();
    let mut totals: BTreeMap<u32, (usize, usize, usize)> = BTreeMap::new();

    for room in &sorted {
        let Some(room_floor) = floor_of(&room.room_number) else {
            continue;
        };
        if floor.is_some_and(|wanted| wanted != room_floor) {
            continue;
        }
        let tasks = rooms.tasks_for_room(room.id).await?;
        let active = tasks.iter().filter(|t| t.status.is_active()).count();
        let completed = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();

        let entry = totals.entry(room_floor).or_default();
        entry.0 += tasks.len();
        entry.1 += active;
        entry.2 += completed;

        floors.entry(room_floor).or_default().push(json!({
            "roomNumber": room.room_number,
            "taskCount": tasks.len(),
            "activeTaskCount": active,
            "completedTaskCount": completed,
        }));
    }

    Ok(floors
        .into_iter()
        .map(|(floor, rooms)| {
            let (total, active, completed) = totals[&floor];
            json!({
                "floor": floor,
                "totalRooms": rooms.len(),
                "totalTasks": total,
                "activeTasks": active,
                "completedTasks": completed,
                "rooms": rooms,
            })
        })
        .collect())
}

/// A room's display snapshot, merged from its latest task.
pub(crate) fn snapshot(room: &Room, tasks: &[Task]) -> serde_json::Value {
    let latest = tasks.first();
    json!({
        "roomNumber": room.room_number,
        "roomType": display_value(&room.room_type.to_string()),
        "status": latest.map(|t| t.status.to_string()),
        "priority": latest.map(|t| t.priority.to_string()),
        "roomStatus": latest.and_then(|t| t.room_status.as_deref().map(display_value)),
        "linen": latest.and_then(|t| t.linen.as_deref().map(display_value)),
        "checkInTime": latest.and_then(|t| t.check_in.clone()),
        "checkOutTime": latest.and_then(|t| t.check_out.clone()),
        "taskCount": tasks.len(),
    })
}

pub(crate) fn task_json(task: &Task) -> serde_json::Value {
    json!({
        "id": task.id,
        "roomNumber": task.room_number,
        "name": task.name,
        "status": task.status.to_string(),
        "priority": task.priority.to_string(),
        "roomStatus": task.room_status,
        "linen": task.linen,
        "checkInTime": task.check_in,
        "checkOutTime": task.check_out,
        "assigneeName": task.assignee_name,
        "dueDate": task.due_date,
        "description": task.description,
        "createdAt": task.created_at,
    })
}

/// The floor a room number belongs to: its leading digit.
pub(crate) fn floor_of(room_number: &str) -> Option<u32> {
    room_number.chars().next()?.to_digit(10)
}

/// Numeric-first sort key for room numbers.
pub(crate) fn numeric_key(room_number: &str) -> (i64, String) {
    match room_number.parse::<i64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (i64::MAX, room_number.to_string()),
    }
}
