// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use roomops_core::EditableField;
use serde::{Deserialize, Serialize};

/// A proposed room update parked in the arena, waiting for confirmation.
///
/// `proposed_value` is already normalized; redeeming the token applies it
/// verbatim. `current_value` is the value at proposal time, shown in the
/// preview so the operator sees what the change replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingUpdate {
    pub token: String,
    pub room_id: i64,
    pub room_number: String,
    pub field: EditableField,
    pub current_value: Option<String>,
    pub proposed_value: String,
    pub created_at: String,
}

/// What applying a confirmed update did to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub room_number: String,
    pub field: EditableField,
    pub value: String,
    /// Task rows the update fanned out to.
    pub updated_tasks: u64,
    /// True when the room had no tasks and a default task was created
    /// to carry the value.
    pub created_task: bool,
}
