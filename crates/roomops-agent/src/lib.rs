// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversational orchestrator.
//!
//! [`Orchestrator::handle_turn`] runs one user turn end to end: ownership
//! checks, conversation bootstrap with a synthesized title, user-message
//! persistence, up to a bounded number of sequential tool rounds against the
//! provider, and final assistant-message persistence. Output streams to the
//! caller as [`TurnEvent`]s while the turn runs.

pub mod events;
pub mod orchestrator;
pub mod shutdown;
pub mod title;

pub use events::TurnEvent;
pub use orchestrator::{Orchestrator, OrchestratorOptions, TurnRequest};
