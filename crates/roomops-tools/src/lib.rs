// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tool registry the orchestrator exposes to the model.
//!
//! Tools form a closed catalogue: [`ToolId`] is an enum and dispatch is an
//! exhaustive `match`, so adding a tool is a compile-checked change. Each
//! tool deserializes the model's JSON into a typed input struct; a payload
//! that does not deserialize is an error *result* handed back to the model,
//! never an error propagated into the agent loop.
//!
//! Every invocation produces a terminal [`ToolOutput`] plus zero or more
//! ordered [`ToolProgress`] events on the context's side channel (document
//! generation streams deltas there while it runs).

pub mod context;
pub mod output;
pub mod registry;
mod tools;
pub mod views;

pub use context::ToolContext;
pub use output::{ToolOutput, ToolProgress};
pub use registry::{ModelProfile, ToolId, ToolRegistry};
