// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parsing for Messages API streaming responses.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use roomops_core::OpsError;

use crate::types::{
    SseContentBlockDelta, SseContentBlockStart, SseContentBlockStop, SseError, SseMessageDelta,
    SseMessageStart,
};

/// Typed events of the Anthropic streaming protocol.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    MessageStart(SseMessageStart),
    ContentBlockStart(SseContentBlockStart),
    ContentBlockDelta(SseContentBlockDelta),
    ContentBlockStop(SseContentBlockStop),
    MessageDelta(SseMessageDelta),
    MessageStop,
    Ping,
    Error(SseError),
}

fn parse_event<T>(name: &str, data: &str) -> Result<T, OpsError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(data).map_err(|e| OpsError::Provider {
        message: format!("failed to parse {name} event: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parses a streaming response body into typed [`StreamEvent`]s.
///
/// Unknown event names are skipped; the API adds event types without a
/// version bump.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, OpsError>> + Send>> {
    let events = response.bytes_stream().eventsource();

    let mapped = events.filter_map(|result| async move {
        match result {
            Ok(event) => {
                let parsed = match event.event.as_str() {
                    "message_start" => {
                        parse_event("message_start", &event.data).map(StreamEvent::MessageStart)
                    }
                    "content_block_start" => parse_event("content_block_start", &event.data)
                        .map(StreamEvent::ContentBlockStart),
                    "content_block_delta" => parse_event("content_block_delta", &event.data)
                        .map(StreamEvent::ContentBlockDelta),
                    "content_block_stop" => parse_event("content_block_stop", &event.data)
                        .map(StreamEvent::ContentBlockStop),
                    "message_delta" => {
                        parse_event("message_delta", &event.data).map(StreamEvent::MessageDelta)
                    }
                    "message_stop" => Ok(StreamEvent::MessageStop),
                    "ping" => Ok(StreamEvent::Ping),
                    "error" => parse_event("error", &event.data).map(StreamEvent::Error),
                    _ => return None,
                };
                Some(parsed)
            }
            Err(e) => Some(Err(OpsError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}
