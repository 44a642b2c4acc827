// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD tools.

use std::str::FromStr;

use roomops_core::{EditableField, Priority, Task, TaskFilter, TaskPatch, TaskStatus, ToolSpec};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::context::ToolContext;
use crate::output::ToolOutput;
use crate::tools::parse_input;
use crate::tools::rooms::lookup_room;
use crate::views::task_json;

// --- createTask ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateTaskInput {
    room_number: String,
    name: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee_name: Option<String>,
    due_date: Option<String>,
    description: Option<String>,
}

pub(crate) fn create_task_spec() -> ToolSpec {
    ToolSpec {
        name: "createTask".to_string(),
        description: "Create a task for a room. Status defaults to TODO and priority to \
                      MEDIUM; the task lands at the bottom of its status column."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomNumber": { "type": "string", "description": "Room number" },
                "name": { "type": "string", "description": "Task name" },
                "status": { "type": "string", "description": "Initial status, e.g. TODO" },
                "priority": { "type": "string", "description": "LOW, MEDIUM, or HIGH" },
                "assigneeName": { "type": "string", "description": "Person assigned" },
                "dueDate": { "type": "string", "description": "Due date, ISO 8601" },
                "description": { "type": "string", "description": "Details" }
            },
            "required": ["roomNumber"]
        }),
    }
}

pub(crate) async fn create_task(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: CreateTaskInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    let room = match lookup_room(ctx, &input.room_number).await {
        Ok(room) => room,
        Err(out) => return out,
    };

    let status = match parse_status(input.status.as_deref()) {
        Ok(status) => status,
        Err(out) => return out,
    };
    let priority = match parse_priority(input.priority.as_deref()) {
        Ok(priority) => priority,
        Err(out) => return out,
    };
    let position = match ctx.rooms.max_position(status).await {
        Ok(max) => max + 1000,
        Err(e) => return ToolOutput::error(e),
    };

    let task = Task {
        id: Uuid::new_v4().to_string(),
        room_id: room.id,
        room_number: room.room_number.clone(),
        room_type: room.room_type,
        name: input
            .name
            .unwrap_or_else(|| format!("Room {} maintenance", room.room_number)),
        status,
        priority,
        room_status: None,
        linen: None,
        check_in: None,
        check_out: None,
        assignee_id: None,
        assignee_name: input.assignee_name,
        due_date: input.due_date,
        description: input.description,
        position,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    match ctx.rooms.create_task(&task).await {
        Ok(()) => ToolOutput::json(&json!({ "task": task_json(&task) })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- updateTask ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateTaskInput {
    task_id: String,
    name: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee_name: Option<String>,
    due_date: Option<String>,
    description: Option<String>,
}

pub(crate) fn update_task_spec() -> ToolSpec {
    ToolSpec {
        name: "updateTask".to_string(),
        description: "Update one task. Only the provided fields change.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "taskId": { "type": "string", "description": "Task id" },
                "name": { "type": "string" },
                "status": { "type": "string", "description": "New status, e.g. DONE" },
                "priority": { "type": "string", "description": "LOW, MEDIUM, or HIGH" },
                "assigneeName": { "type": "string" },
                "dueDate": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["taskId"]
        }),
    }
}

pub(crate) async fn update_task(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: UpdateTaskInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };

    let mut patch = TaskPatch {
        name: input.name,
        assignee_name: input.assignee_name,
        due_date: input.due_date,
        description: input.description,
        ..TaskPatch::default()
    };
    if let Some(raw) = input.status.as_deref() {
        match parse_status(Some(raw)) {
            Ok(status) => patch.status = Some(status),
            Err(out) => return out,
        }
    }
    if let Some(raw) = input.priority.as_deref() {
        match parse_priority(Some(raw)) {
            Ok(priority) => patch.priority = Some(priority),
            Err(out) => return out,
        }
    }
    if patch.is_empty() {
        return ToolOutput::error("no fields to update");
    }

    if let Err(e) = ctx.rooms.update_task(&input.task_id, &patch).await {
        return ToolOutput::error(e);
    }
    match ctx.rooms.task(&input.task_id).await {
        Ok(Some(task)) => ToolOutput::json(&json!({ "task": task_json(&task) })),
        Ok(None) => ToolOutput::error(format!("task {} not found", input.task_id)),
        Err(e) => ToolOutput::error(e),
    }
}

// --- deleteTask ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TaskIdInput {
    task_id: String,
}

pub(crate) fn delete_task_spec() -> ToolSpec {
    ToolSpec {
        name: "deleteTask".to_string(),
        description: "Permanently delete a task. There is no undo.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "taskId": { "type": "string", "description": "Task id" }
            },
            "required": ["taskId"]
        }),
    }
}

pub(crate) async fn delete_task(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: TaskIdInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    match ctx.rooms.delete_task(&input.task_id).await {
        Ok(()) => ToolOutput::json(&json!({ "deleted": input.task_id })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- getTaskDetail ---

pub(crate) fn get_task_detail_spec() -> ToolSpec {
    ToolSpec {
        name: "getTaskDetail".to_string(),
        description: "Fetch one task by id.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "taskId": { "type": "string", "description": "Task id" }
            },
            "required": ["taskId"]
        }),
    }
}

pub(crate) async fn get_task_detail(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: TaskIdInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };
    match ctx.rooms.task(&input.task_id).await {
        Ok(Some(task)) => ToolOutput::json(&json!({ "task": task_json(&task) })),
        Ok(None) => ToolOutput::error(format!("task {} not found", input.task_id)),
        Err(e) => ToolOutput::error(e),
    }
}

// --- listTasks ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListTasksInput {
    room_number: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee_id: Option<String>,
}

pub(crate) fn list_tasks_spec() -> ToolSpec {
    ToolSpec {
        name: "listTasks".to_string(),
        description: "List tasks across the board, filtered by any of room, status, \
                      priority, assignee."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomNumber": { "type": "string", "description": "Restrict to one room" },
                "status": { "type": "string", "description": "Task status" },
                "priority": { "type": "string", "description": "LOW, MEDIUM, or HIGH" },
                "assigneeId": { "type": "string", "description": "Assignee id" }
            }
        }),
    }
}

pub(crate) async fn list_tasks(ctx: &ToolContext, input: serde_json::Value) -> ToolOutput {
    let input: ListTasksInput = match parse_input(input) {
        Ok(v) => v,
        Err(out) => return out,
    };

    let mut filter = TaskFilter {
        assignee_id: input.assignee_id,
        ..TaskFilter::default()
    };
    if let Some(room_number) = &input.room_number {
        match lookup_room(ctx, room_number).await {
            Ok(room) => filter.room_id = Some(room.id),
            Err(out) => return out,
        }
    }
    if let Some(raw) = input.status.as_deref() {
        match parse_status(Some(raw)) {
            Ok(status) => filter.status = Some(status),
            Err(out) => return out,
        }
    }
    if let Some(raw) = input.priority.as_deref() {
        match parse_priority(Some(raw)) {
            Ok(priority) => filter.priority = Some(priority),
            Err(out) => return out,
        }
    }

    match ctx.rooms.list_tasks(&filter).await {
        Ok(tasks) => ToolOutput::json(&json!({
            "count": tasks.len(),
            "tasks": tasks.iter().map(task_json).collect::<Vec<_>>(),
        })),
        Err(e) => ToolOutput::error(e),
    }
}

// --- helpers ---

fn parse_status(raw: Option<&str>) -> Result<TaskStatus, ToolOutput> {
    let Some(raw) = raw else {
        return Ok(TaskStatus::Todo);
    };
    let normalized = EditableField::Status.normalize(raw);
    TaskStatus::from_str(&normalized)
        .map_err(|_| ToolOutput::error(format!("{raw:?} is not a valid status")))
}

fn parse_priority(raw: Option<&str>) -> Result<Priority, ToolOutput> {
    let Some(raw) = raw else {
        return Ok(Priority::Medium);
    };
    let normalized = EditableField::Priority.normalize(raw);
    Priority::from_str(&normalized)
        .map_err(|_| ToolOutput::error(format!("{raw:?} is not a valid priority")))
}
