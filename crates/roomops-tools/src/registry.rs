// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool identifiers, capability gating, and dispatch.

use std::str::FromStr;

use roomops_core::ToolSpec;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::context::ToolContext;
use crate::output::ToolOutput;
use crate::tools::{documents, rooms, tasks};

/// The closed catalogue of tools. Wire names are the camelCase forms the
/// model invokes ("getRoomInfo", "confirmRoomUpdate", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ToolId {
    GetRoomInfo,
    GetRoomTasks,
    GetFloorOverview,
    FilterRooms,
    UpdateRoomData,
    ConfirmRoomUpdate,
    CreateTask,
    UpdateTask,
    DeleteTask,
    GetTaskDetail,
    ListTasks,
    CreateDocument,
    UpdateDocument,
    RequestSuggestions,
}

/// Which tool set a model variant is trusted with.
///
/// This is a capability gate for the model, not an authorization boundary:
/// the HTTP surface enforces auth independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProfile {
    /// Ordinary chat model: every tool except administrative deletion.
    Default,
    /// Extended-reasoning model: no tools at all.
    Reasoning,
}

/// Stateless facade over the tool catalogue.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Tool ids visible to a profile, in catalogue order.
    pub fn allowed(profile: ModelProfile) -> Vec<ToolId> {
        match profile {
            ModelProfile::Reasoning => Vec::new(),
            ModelProfile::Default => ToolId::iter()
                .filter(|id| *id != ToolId::DeleteTask)
                .collect(),
        }
    }

    /// Provider-facing tool definitions for a profile.
    pub fn specs(profile: ModelProfile) -> Vec<ToolSpec> {
        Self::allowed(profile).into_iter().map(spec).collect()
    }

    /// Runs one tool by wire name.
    ///
    /// Unknown names and tools outside the profile's gate come back as
    /// error outputs; dispatch itself never fails.
    pub async fn dispatch(
        ctx: &ToolContext,
        profile: ModelProfile,
        name: &str,
        input: serde_json::Value,
    ) -> ToolOutput {
        let Ok(id) = ToolId::from_str(name) else {
            return ToolOutput::error(format!("unknown tool {name:?}"));
        };
        if !Self::allowed(profile).contains(&id) {
            return ToolOutput::error(format!("tool {name:?} is not available"));
        }
        debug!(tool = %id, "dispatching tool");
        match id {
            ToolId::GetRoomInfo => rooms::get_room_info(ctx, input).await,
            ToolId::GetRoomTasks => rooms::get_room_tasks(ctx, input).await,
            ToolId::GetFloorOverview => rooms::get_floor_overview(ctx, input).await,
            ToolId::FilterRooms => rooms::filter_rooms(ctx, input).await,
            ToolId::UpdateRoomData => rooms::update_room_data(ctx, input).await,
            ToolId::ConfirmRoomUpdate => rooms::confirm_room_update(ctx, input).await,
            ToolId::CreateTask => tasks::create_task(ctx, input).await,
            ToolId::UpdateTask => tasks::update_task(ctx, input).await,
            ToolId::DeleteTask => tasks::delete_task(ctx, input).await,
            ToolId::GetTaskDetail => tasks::get_task_detail(ctx, input).await,
            ToolId::ListTasks => tasks::list_tasks(ctx, input).await,
            ToolId::CreateDocument => documents::create_document(ctx, input).await,
            ToolId::UpdateDocument => documents::update_document(ctx, input).await,
            ToolId::RequestSuggestions => documents::request_suggestions(ctx, input).await,
        }
    }
}

/// The provider-facing definition for one tool.
pub fn spec(id: ToolId) -> ToolSpec {
    match id {
        ToolId::GetRoomInfo => rooms::get_room_info_spec(),
        ToolId::GetRoomTasks => rooms::get_room_tasks_spec(),
        ToolId::GetFloorOverview => rooms::get_floor_overview_spec(),
        ToolId::FilterRooms => rooms::filter_rooms_spec(),
        ToolId::UpdateRoomData => rooms::update_room_data_spec(),
        ToolId::ConfirmRoomUpdate => rooms::confirm_room_update_spec(),
        ToolId::CreateTask => tasks::create_task_spec(),
        ToolId::UpdateTask => tasks::update_task_spec(),
        ToolId::DeleteTask => tasks::delete_task_spec(),
        ToolId::GetTaskDetail => tasks::get_task_detail_spec(),
        ToolId::ListTasks => tasks::list_tasks_spec(),
        ToolId::CreateDocument => documents::create_document_spec(),
        ToolId::UpdateDocument => documents::update_document_spec(),
        ToolId::RequestSuggestions => documents::request_suggestions_spec(),
    }
}
