// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API adapter.
//!
//! [`AnthropicClient`] handles HTTP transport, authentication headers, and
//! one retry on transient statuses. [`AnthropicProvider`] sits on top and
//! implements the workspace's [`roomops_core::ChatProvider`] seam: transcript
//! messages are converted to the wire format, the SSE stream is parsed, and
//! tool_use input arriving as partial-JSON deltas is assembled into complete
//! tool calls.

pub mod client;
pub mod provider;
pub mod sse;
pub mod types;

pub use client::AnthropicClient;
pub use provider::AnthropicProvider;
