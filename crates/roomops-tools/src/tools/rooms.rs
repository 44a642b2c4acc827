// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Room-facing tools: snapshots, floor aggregation, filtering, and the
//! two-phase update pair.

use roomops_confirm::protocol;
use roomops_core::{EditableField, Room, ToolSpec};
use serde::Deserialize;
use serde_json::json;

use crate::context::ToolContext;
use crate::output::ToolOutput;
use crate::tools::parse_input;
use crate::views;

// --- getRoomInfo ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RoomInfoInput {
    room_number: String,
}

pub(crate) fn get_room_info_spec() -> ToolSpec {
    ToolSpec {
        name: "getRoomInfo".to_string(),
        description: "Get the current state of a room: type, status, priority, occupancy, \
                      linen, check-in/out times, and its task list."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomNumber": { "type": "string", "description": "Room number, e.g. \"204\"" }
            },
            "required": ["roomNumber"]
        }),
    }
}

pub(crate) async fn get_room_info(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: RoomInfoInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let room = match lookup_room(ctx, &input.room_number).await {
        Ok(room) => room,
        Err(out) => return out,
    };
    match ctx.rooms.tasks_for_room(room.id).await {
        Ok(tasks) => ToolOutput::json(&views::room_payload(&room, &tasks)),
        Err(e) => ToolOutput::error(e),
    }
}

// --- getRoomTasks ---

pub(crate) fn get_room_tasks_spec() -> ToolSpec {
    ToolSpec {
        name: "getRoomTasks".to_string(),
        description: "List the tasks of one room, newest first.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomNumber": { "type": "string", "description": "Room number" }
            },
            "required": ["roomNumber"]
        }),
    }
}

pub(crate) async fn get_room_tasks(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: RoomInfoInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let room = match lookup_room(ctx, &input.room_number).await {
        Ok(room) => room,
        Err(out) => return out,
    };
    match ctx.rooms.tasks_for_room(room.id).await {
        Ok(tasks) => ToolOutput::json(&json!({
            "roomNumber": room.room_number,
            "count": tasks.len(),
            "tasks": tasks.iter().map(views::task_json).collect::<Vec<_>>(),
        })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- getFloorOverview ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FloorOverviewInput {
    /// Restrict to one floor; omitted means all floors.
    floor: Option<u32>,
}

pub(crate) fn get_floor_overview_spec() -> ToolSpec {
    ToolSpec {
        name: "getFloorOverview".to_string(),
        description: "Task counts per room grouped by floor (the leading digit of the room \
                      number), with active and completed totals. Optionally restricted to \
                      one floor."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "floor": { "type": "integer", "description": "Floor number to restrict to" }
            }
        }),
    }
}

pub(crate) async fn get_floor_overview(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: FloorOverviewInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    match views::floor_overview(ctx.rooms.as_ref(), input.floor).await {
        Ok(overview) => ToolOutput::json(&json!({ "floors": overview })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- filterRooms ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FilterRoomsInput {
    room_type: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    room_status: Option<String>,
    linen: Option<String>,
    /// Matches the room-number prefix.
    floor: Option<String>,
}

pub(crate) fn filter_rooms_spec() -> ToolSpec {
    ToolSpec {
        name: "filterRooms".to_string(),
        description: "Find rooms matching every provided criterion: room type, priority, \
                      status, occupancy, linen, floor."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomType": { "type": "string", "description": "STANDARD, DELUXE, SUITE, or PRESIDENT" },
                "priority": { "type": "string", "description": "LOW, MEDIUM, or HIGH" },
                "status": { "type": "string", "description": "Task status, e.g. TODO or IN_PROGRESS" },
                "roomStatus": { "type": "string", "description": "Occupancy, e.g. STAY OVER or DEPARTURE" },
                "linen": { "type": "string", "description": "Linen state, e.g. YES or NO" },
                "floor": { "type": "string", "description": "Floor digit the room number starts with" }
            }
        }),
    }
}

pub(crate) async fn filter_rooms(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: FilterRoomsInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let rooms = match ctx.rooms.list_rooms().await {
        Ok(rooms) => rooms,
        Err(e) => return ToolOutput::error(e),
    };

    // Criteria normalize the same way proposed values do, so "stay over"
    // matches the stored "STAY_OVER".
    let want_type = input.room_type.map(|v| EditableField::RoomType.normalize(&v));
    let want_priority = input.priority.map(|v| EditableField::Priority.normalize(&v));
    let want_status = input.status.map(|v| EditableField::Status.normalize(&v));
    let want_room_status = input.room_status.map(|v| EditableField::RoomStatus.normalize(&v));
    let want_linen = input.linen.map(|v| EditableField::Linen.normalize(&v));

    let mut matches = Vec::new();
    let mut sorted = rooms;
    sorted.sort_by_key(|room| views::numeric_key(&room.room_number));
    for room in &sorted {
        if let Some(floor) = &input.floor {
            if !room.room_number.starts_with(floor.trim()) {
                continue;
            }
        }
        if let Some(want) = &want_type {
            if room.room_type.to_string() != *want {
                continue;
            }
        }
        let tasks = match ctx.rooms.tasks_for_room(room.id).await {
            Ok(tasks) => tasks,
            Err(e) => return ToolOutput::error(e),
        };
        let latest = tasks.first();
        if let Some(want) = &want_priority {
            if latest.map(|t| t.priority.to_string()) != Some(want.clone()) {
                continue;
            }
        }
        if let Some(want) = &want_status {
            if latest.map(|t| t.status.to_string()) != Some(want.clone()) {
                continue;
            }
        }
        if let Some(want) = &want_room_status {
            if latest.and_then(|t| t.room_status.as_deref()) != Some(want.as_str()) {
                continue;
            }
        }
        if let Some(want) = &want_linen {
            if latest.and_then(|t| t.linen.as_deref()) != Some(want.as_str()) {
                continue;
            }
        }
        matches.push(views::snapshot(room, &tasks));
    }

    ToolOutput::json(&json!({ "count": matches.len(), "rooms": matches }))
}

// --- updateRoomData ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateRoomDataInput {
    room_number: String,
    /// Display field name ("Room Type", "Status", ...).
    field: String,
    value: String,
}

pub(crate) fn update_room_data_spec() -> ToolSpec {
    ToolSpec {
        name: "updateRoomData".to_string(),
        description: "Propose a change to one field of a room. Nothing is written; the \
                      reply is a preview with a confirmation token the user must approve."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomNumber": { "type": "string", "description": "Room number" },
                "field": {
                    "type": "string",
                    "enum": ["Room Type", "Priority", "Status", "Room Status", "Linen",
                             "Check In Time", "Check Out Time"],
                    "description": "Field to change"
                },
                "value": { "type": "string", "description": "Proposed value" }
            },
            "required": ["roomNumber", "field", "value"]
        }),
    }
}

pub(crate) async fn update_room_data(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: UpdateRoomDataInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    match protocol::propose(
        ctx.rooms.as_ref(),
        &ctx.pending,
        &input.room_number,
        &input.field,
        &input.value,
    )
    .await
    {
        Ok(pending) => ToolOutput::json(&json!({
            "type": "update-preview",
            "token": pending.token,
            "roomNumber": pending.room_number,
            "field": pending.field.to_string(),
            "currentValue": pending.current_value,
            "proposedValue": pending.proposed_value,
            "message": format!(
                "Proposed setting {} of room {} to {}. Awaiting confirmation.",
                pending.field, pending.room_number, pending.proposed_value
            ),
        })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- confirmRoomUpdate ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfirmRoomUpdateInput {
    token: String,
}

pub(crate) fn confirm_room_update_spec() -> ToolSpec {
    ToolSpec {
        name: "confirmRoomUpdate".to_string(),
        description: "Apply a previously proposed room update. Takes the token from the \
                      update preview; the token works once and expires."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "token": { "type": "string", "description": "Confirmation token from the preview" }
            },
            "required": ["token"]
        }),
    }
}

pub(crate) async fn confirm_room_update(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: ConfirmRoomUpdateInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    match protocol::apply(ctx.rooms.as_ref(), &ctx.pending, &input.token).await {
        Ok(outcome) => ToolOutput::json(&json!({
            "roomNumber": outcome.room_number,
            "field": outcome.field.to_string(),
            "value": outcome.value,
            "updatedTasks": outcome.updated_tasks,
            "createdTask": outcome.created_task,
            "message": format!(
                "Set {} of room {} to {}.",
                outcome.field, outcome.room_number, outcome.value
            ),
        })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- shared helpers ---

pub(crate) async fn lookup_room(ctx: &ToolContext, room_number: &str) -> Result<Room, ToolOutput> {
    match ctx.rooms.room_by_number(room_number).await {
        Ok(Some(room)) => Ok(room),
        Ok(None) => Err(ToolOutput::error(format!("room {room_number} not found"))),
        Err(e) => Err(ToolOutput::error(e)),
    }
}
