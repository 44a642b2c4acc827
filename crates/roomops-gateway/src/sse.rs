// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events bridge for `POST /v1/chat`.
//!
//! Each [`TurnEvent`] becomes one SSE event whose name matches the payload's
//! `type` tag:
//!
//! ```text
//! event: text-delta
//! data: {"type":"text-delta","delta":"Room 204 is "}
//!
//! event: finished
//! data: {"type":"finished","conversationId":"...","messageId":"..."}
//! ```
//!
//! The stream closes when the turn's channel closes; a turn failure arrives
//! as a terminal `error` event, not as a broken connection.

use std::convert::Infallible;

use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use futures::Stream;
use futures::stream;
use roomops_agent::{Orchestrator, TurnEvent, TurnRequest};
use serde_json::json;

/// Runs one turn and adapts its event channel into an SSE response.
pub fn turn_stream(
    orchestrator: &Orchestrator,
    request: TurnRequest,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    let rx = orchestrator.handle_turn(request);
    let stream = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Ok(to_sse_event(&event)), rx))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &TurnEvent) -> Event {
    let value = serde_json::to_value(event)
        .unwrap_or_else(|e| json!({ "type": "error", "message": e.to_string() }));
    let name = value
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or("message")
        .to_string();
    Event::default().event(name).data(value.to_string())
}
