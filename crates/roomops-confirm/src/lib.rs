// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-phase confirmation for room updates.
//!
//! A proposed change never reaches the store directly. [`propose`] validates
//! the field and value, captures the room's current value, and parks the
//! normalized change in a [`PendingArena`] behind a single-use token. The
//! change only lands when [`apply`] redeems that token; [`decline`] discards
//! it. Tokens expire after a configurable TTL.

pub mod arena;
pub mod pending;
pub mod protocol;

pub use arena::PendingArena;
pub use pending::{PendingUpdate, UpdateOutcome};
pub use protocol::{apply, decline, propose};
