// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end dispatch tests against a real SQLite store and a scripted
//! provider.

use std::sync::Arc;

use async_trait::async_trait;
use roomops_confirm::PendingArena;
use roomops_core::{
    ChatProvider, ChatRequest, OpsError, Principal, ProviderEvent, ProviderEventStream, RoomType,
    TaskStatus,
};
use roomops_store::SqliteStore;
use roomops_tools::{ModelProfile, ToolContext, ToolProgress, ToolRegistry};
use serde_json::json;
use tokio::sync::mpsc;

/// Provider that replays a fixed event script for every stream request.
struct ScriptedProvider {
    script: Vec<ProviderEvent>,
    completion: String,
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn stream_chat(&self, _request: ChatRequest) -> Result<ProviderEventStream, OpsError> {
        let events: Vec<Result<ProviderEvent, OpsError>> =
            self.script.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(events)))
    }

    async fn complete_text(&self, _system: &str, _prompt: &str) -> Result<String, OpsError> {
        Ok(self.completion.clone())
    }
}

struct Harness {
    store: Arc<SqliteStore>,
    ctx: ToolContext,
    progress: mpsc::Receiver<ToolProgress>,
    _dir: tempfile::TempDir,
}

async fn harness(script: Vec<ProviderEvent>, completion: &str) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tools.db");
    let store = Arc::new(SqliteStore::open(path.to_str().unwrap()).await.unwrap());
    let provider = Arc::new(ScriptedProvider {
        script,
        completion: completion.to_string(),
    });
    let (tx, rx) = mpsc::channel(64);
    let ctx = ToolContext::new(
        Principal {
            user_id: "user-1".to_string(),
            name: Some("Dana".to_string()),
        },
        store.clone(),
        store.clone(),
        provider,
        Arc::new(PendingArena::new(std::time::Duration::from_secs(600))),
        tx,
    );
    Harness {
        store,
        ctx,
        progress: rx,
        _dir: dir,
    }
}

async fn seed_room_with_task(h: &Harness, number: &str, status: TaskStatus) -> i64 {
    let room = h.store.create_room(number, RoomType::Standard).await.unwrap();
    let task = roomops_core::Task {
        id: format!("task-{number}-{status}"),
        room_id: room.id,
        room_number: room.room_number.clone(),
        room_type: room.room_type,
        name: format!("Room {number} maintenance"),
        status,
        priority: roomops_core::Priority::Medium,
        room_status: Some("STAY_OVER".to_string()),
        linen: Some("YES".to_string()),
        check_in: None,
        check_out: None,
        assignee_id: None,
        assignee_name: None,
        due_date: None,
        description: None,
        position: 1000,
        created_at: "2026-01-01T00:00:00Z".to_string(),
    };
    roomops_core::RoomStore::create_task(h.store.as_ref(), &task)
        .await
        .unwrap();
    room.id
}

fn content(out: &roomops_tools::ToolOutput) -> serde_json::Value {
    serde_json::from_str(&out.content).unwrap()
}

#[tokio::test]
async fn room_info_merges_latest_task() {
    let h = harness(Vec::new(), "").await;
    seed_room_with_task(&h, "204", TaskStatus::InProgress).await;

    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "getRoomInfo",
        json!({"roomNumber": "204"}),
    )
    .await;
    assert!(!out.is_error);
    let value = content(&out);
    assert_eq!(value["roomNumber"], "204");
    assert_eq!(value["status"], "IN_PROGRESS");
    assert_eq!(value["roomStatus"], "Stay Over");
    assert_eq!(value["linen"], "Yes");
    assert_eq!(value["taskCount"], 1);
}

#[tokio::test]
async fn unknown_room_is_an_error_result() {
    let h = harness(Vec::new(), "").await;
    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "getRoomInfo",
        json!({"roomNumber": "999"}),
    )
    .await;
    assert!(out.is_error);
    assert_eq!(content(&out)["error"], "room 999 not found");
}

#[tokio::test]
async fn malformed_input_is_an_error_result() {
    let h = harness(Vec::new(), "").await;
    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "getRoomInfo",
        json!({"room": 204}),
    )
    .await;
    assert!(out.is_error);
}

#[tokio::test]
async fn floor_overview_groups_and_counts() {
    let h = harness(Vec::new(), "").await;
    seed_room_with_task(&h, "101", TaskStatus::Todo).await;
    seed_room_with_task(&h, "102", TaskStatus::Done).await;
    seed_room_with_task(&h, "201", TaskStatus::InProgress).await;

    let out =
        ToolRegistry::dispatch(&h.ctx, ModelProfile::Default, "getFloorOverview", json!({})).await;
    assert!(!out.is_error);
    let value = content(&out);
    let floors = value["floors"].as_array().unwrap();
    assert_eq!(floors.len(), 2);

    assert_eq!(floors[0]["floor"], 1);
    assert_eq!(floors[0]["totalRooms"], 2);
    assert_eq!(floors[0]["totalTasks"], 2);
    assert_eq!(floors[0]["activeTasks"], 1);
    assert_eq!(floors[0]["completedTasks"], 1);
    let rooms: Vec<&str> = floors[0]["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roomNumber"].as_str().unwrap())
        .collect();
    assert_eq!(rooms, vec!["101", "102"]);

    assert_eq!(floors[1]["floor"], 2);
    assert_eq!(floors[1]["totalRooms"], 1);
    assert_eq!(floors[1]["activeTasks"], 1);
}

#[tokio::test]
async fn floor_overview_honors_floor_filter() {
    let h = harness(Vec::new(), "").await;
    seed_room_with_task(&h, "101", TaskStatus::Todo).await;
    seed_room_with_task(&h, "201", TaskStatus::Todo).await;

    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "getFloorOverview",
        json!({"floor": 2}),
    )
    .await;
    let value = content(&out);
    let floors = value["floors"].as_array().unwrap();
    assert_eq!(floors.len(), 1);
    assert_eq!(floors[0]["floor"], 2);
}

#[tokio::test]
async fn filter_rooms_normalizes_criteria() {
    let h = harness(Vec::new(), "").await;
    seed_room_with_task(&h, "101", TaskStatus::Todo).await;
    seed_room_with_task(&h, "305", TaskStatus::Done).await;

    // "stay over" must match the stored "STAY_OVER".
    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "filterRooms",
        json!({"roomStatus": "stay over", "status": "to do"}),
    )
    .await;
    assert!(!out.is_error);
    let value = content(&out);
    assert_eq!(value["count"], 1);
    assert_eq!(value["rooms"][0]["roomNumber"], "101");
}

#[tokio::test]
async fn update_confirm_round_trip_through_dispatch() {
    let h = harness(Vec::new(), "").await;
    let room_id = seed_room_with_task(&h, "204", TaskStatus::Todo).await;

    let preview = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "updateRoomData",
        json!({"roomNumber": "204", "field": "Status", "value": "in progress"}),
    )
    .await;
    assert!(!preview.is_error);
    let preview = content(&preview);
    assert_eq!(preview["type"], "update-preview");
    assert_eq!(preview["proposedValue"], "IN_PROGRESS");
    let token = preview["token"].as_str().unwrap();

    // Nothing changed yet.
    let tasks = roomops_core::RoomStore::tasks_for_room(h.store.as_ref(), room_id)
        .await
        .unwrap();
    assert_eq!(tasks[0].status, TaskStatus::Todo);

    let confirmed = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "confirmRoomUpdate",
        json!({"token": token}),
    )
    .await;
    assert!(!confirmed.is_error);
    assert_eq!(content(&confirmed)["updatedTasks"], 1);

    let tasks = roomops_core::RoomStore::tasks_for_room(h.store.as_ref(), room_id)
        .await
        .unwrap();
    assert_eq!(tasks[0].status, TaskStatus::InProgress);

    // The token is spent.
    let replay = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "confirmRoomUpdate",
        json!({"token": token}),
    )
    .await;
    assert!(replay.is_error);
}

#[tokio::test]
async fn delete_task_is_gated_for_default_profile() {
    let h = harness(Vec::new(), "").await;
    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "deleteTask",
        json!({"taskId": "t1"}),
    )
    .await;
    assert!(out.is_error);
    assert!(
        content(&out)["error"]
            .as_str()
            .unwrap()
            .contains("not available")
    );
}

#[tokio::test]
async fn create_task_appends_to_status_column() {
    let h = harness(Vec::new(), "").await;
    seed_room_with_task(&h, "204", TaskStatus::Todo).await;

    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "createTask",
        json!({"roomNumber": "204", "name": "Replace towels", "priority": "high"}),
    )
    .await;
    assert!(!out.is_error);
    let task = &content(&out)["task"];
    assert_eq!(task["status"], "TODO");
    assert_eq!(task["priority"], "HIGH");

    // Seeded task sits at position 1000; the new one lands below it.
    let id = task["id"].as_str().unwrap();
    let stored = roomops_core::RoomStore::task(h.store.as_ref(), id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.position, 2000);
}

#[tokio::test]
async fn create_document_streams_deltas_and_persists() {
    let script = vec![
        ProviderEvent::TextDelta("Checklist:\n".to_string()),
        ProviderEvent::TextDelta("- strip beds".to_string()),
        ProviderEvent::Done {
            stop_reason: Some("end_turn".to_string()),
            usage: None,
        },
    ];
    let mut h = harness(script, "").await;

    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "createDocument",
        json!({"title": "Turnover checklist"}),
    )
    .await;
    assert!(!out.is_error);
    let document_id = content(&out)["documentId"].as_str().unwrap().to_string();

    let mut deltas = Vec::new();
    let mut saw_start = false;
    let mut saw_finish = false;
    while let Ok(event) = h.progress.try_recv() {
        match event {
            ToolProgress::DocumentStart { .. } => saw_start = true,
            ToolProgress::DocumentDelta { delta, .. } => deltas.push(delta),
            ToolProgress::DocumentFinish { .. } => saw_finish = true,
            ToolProgress::SuggestionReady { .. } => {}
        }
    }
    assert!(saw_start);
    assert!(saw_finish);
    assert_eq!(deltas, vec!["Checklist:\n", "- strip beds"]);

    let stored = roomops_core::DocumentStore::document(h.store.as_ref(), &document_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, "Checklist:\n- strip beds");
    assert_eq!(stored.owner_id, "user-1");
}

#[tokio::test]
async fn request_suggestions_parses_and_persists() {
    let completion = r#"[{"originalText": "strip beds", "suggestedText": "strip and inspect beds", "description": "catch stains early"}]"#;
    let h = harness(Vec::new(), completion).await;

    let document = roomops_core::Document {
        id: "d1".to_string(),
        title: "Turnover checklist".to_string(),
        kind: roomops_core::DocumentKind::Text,
        content: "strip beds".to_string(),
        owner_id: "user-1".to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    };
    roomops_core::DocumentStore::save_document(h.store.as_ref(), &document)
        .await
        .unwrap();

    let out = ToolRegistry::dispatch(
        &h.ctx,
        ModelProfile::Default,
        "requestSuggestions",
        json!({"documentId": "d1"}),
    )
    .await;
    assert!(!out.is_error);
    assert_eq!(content(&out)["count"], 1);

    let stored = roomops_core::DocumentStore::suggestions_for_document(h.store.as_ref(), "d1")
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].suggested_text, "strip and inspect beds");
}
