// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use roomops_agent::TurnRequest;
use roomops_confirm::protocol;
use roomops_core::{ChatMessage, ChatRole, Principal};
use roomops_tools::ModelProfile;
use roomops_tools::views;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::sse;

/// Request body for `POST /v1/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnBody {
    pub conversation_id: String,
    /// Client-side transcript including the newest user message.
    pub messages: Vec<ChatMessage>,
    /// "default" or "reasoning"; unknown values fall back to default.
    #[serde(default)]
    pub profile: Option<String>,
}

/// POST /v1/chat
///
/// Runs one turn and streams [`roomops_agent::TurnEvent`]s back as SSE.
pub async fn post_chat(
    State(state): State<GatewayState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<ChatTurnBody>,
) -> Result<Response, ApiError> {
    if !body.messages.iter().any(|m| m.role == ChatRole::User) {
        return Err(ApiError(roomops_core::OpsError::Validation(
            "no user message in request".to_string(),
        )));
    }
    let profile = match body.profile.as_deref() {
        Some("reasoning") => ModelProfile::Reasoning,
        _ => ModelProfile::Default,
    };
    let request = TurnRequest {
        principal,
        conversation_id: body.conversation_id,
        messages: body.messages,
        profile,
    };
    Ok(sse::turn_stream(&state.orchestrator, request).into_response())
}

/// GET /v1/chat/{id}
pub async fn get_conversation(
    State(state): State<GatewayState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let conversation = state
        .transcripts
        .conversation(&id)
        .await?
        .ok_or(roomops_core::OpsError::NotFound {
            kind: "conversation",
            id: id.clone(),
        })?;
    if conversation.owner_id != principal.user_id {
        return Err(ApiError(roomops_core::OpsError::Unauthorized));
    }
    let messages = state.transcripts.messages(&id).await?;
    Ok(Json(json!({
        "conversation": conversation,
        "messages": messages,
    })))
}

/// DELETE /v1/chat/{id}
pub async fn delete_conversation(
    State(state): State<GatewayState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let conversation = state
        .transcripts
        .conversation(&id)
        .await?
        .ok_or(roomops_core::OpsError::NotFound {
            kind: "conversation",
            id: id.clone(),
        })?;
    if conversation.owner_id != principal.user_id {
        return Err(ApiError(roomops_core::OpsError::Unauthorized));
    }
    state.transcripts.delete_conversation(&id).await?;
    Ok(Json(json!({ "id": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfoQuery {
    #[serde(default)]
    pub room_number: Option<String>,
}

/// GET /v1/rooms/info?roomNumber=
pub async fn get_room_info(
    State(state): State<GatewayState>,
    Query(query): Query<RoomInfoQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let room_number = query
        .room_number
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            roomops_core::OpsError::Validation("roomNumber query parameter is required".to_string())
        })?;
    let overview = views::room_overview(state.rooms.as_ref(), room_number).await?;
    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
pub struct FloorOverviewQuery {
    #[serde(default)]
    pub floor: Option<u32>,
}

/// GET /v1/rooms/floor-overview[?floor=]
pub async fn get_floor_overview(
    State(state): State<GatewayState>,
    Query(query): Query<FloorOverviewQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let overview = views::floor_overview(state.rooms.as_ref(), query.floor).await?;
    Ok(Json(json!({ "overview": overview })))
}

/// Request body for `POST /v1/rooms/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdateBody {
    pub room_number: String,
    /// Display field name ("Room Type", "Status", ...).
    pub field: String,
    pub new_value: String,
}

/// POST /v1/rooms/update
///
/// Stages a change and returns a preview with a confirmation token.
/// Nothing is written until the token is confirmed.
pub async fn post_room_update(
    State(state): State<GatewayState>,
    Json(body): Json<RoomUpdateBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pending = protocol::propose(
        state.rooms.as_ref(),
        &state.pending,
        &body.room_number,
        &body.field,
        &body.new_value,
    )
    .await?;
    Ok(Json(json!({
        "preview": {
            "roomNumber": pending.room_number,
            "field": pending.field.to_string(),
            "currentValue": pending.current_value,
            "proposedValue": pending.proposed_value,
        },
        "token": pending.token,
    })))
}

#[derive(Debug, Deserialize)]
pub struct TokenBody {
    #[serde(default)]
    pub token: Option<String>,
}

/// POST /v1/rooms/confirm
pub async fn post_room_confirm(
    State(state): State<GatewayState>,
    Json(body): Json<TokenBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = require_token(&body)?;
    let outcome = protocol::apply(state.rooms.as_ref(), &state.pending, token).await?;
    Ok(Json(json!({
        "message": format!(
            "Set {} of room {} to {}.",
            outcome.field, outcome.room_number, outcome.value
        ),
        "status": "success",
        "updatedTasks": outcome.updated_tasks,
        "createdTask": outcome.created_task,
    })))
}

/// POST /v1/rooms/decline
pub async fn post_room_decline(
    State(state): State<GatewayState>,
    Json(body): Json<TokenBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = require_token(&body)?;
    protocol::decline(&state.pending, token);
    Ok(Json(json!({
        "message": "Update declined; nothing was changed.",
        "status": "declined",
    })))
}

/// GET /health (unauthenticated)
pub async fn get_health(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": state.start_time.elapsed().as_secs(),
    }))
}

fn require_token(body: &TokenBody) -> Result<&str, ApiError> {
    body.token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError(roomops_core::OpsError::Validation(
                "token is required".to_string(),
            ))
        })
}
