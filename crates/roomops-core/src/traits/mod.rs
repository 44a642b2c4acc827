// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async trait seams for the external collaborators: the room/task data
//! store, the transcript store, the document store, and the LLM provider.
//!
//! Everything behind these traits is treated as an externally-synchronized
//! shared resource; callers never hold in-process locks across awaits.

pub mod provider;
pub mod store;

pub use provider::{ChatProvider, ChatRequest, ProviderEvent, ProviderEventStream, ToolSpec};
pub use store::{DocumentStore, RoomStore, TranscriptStore};
