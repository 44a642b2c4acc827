// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use roomops_confirm::PendingArena;
use roomops_core::{ChatProvider, DocumentStore, Principal, RoomStore};
use tokio::sync::mpsc;

use crate::output::ToolProgress;

/// Everything a tool invocation may touch, passed explicitly.
///
/// Tools never reach for ambient state; the orchestrator builds one context
/// per turn and hands it to every dispatch in that turn.
#[derive(Clone)]
pub struct ToolContext {
    pub principal: Principal,
    pub rooms: Arc<dyn RoomStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub provider: Arc<dyn ChatProvider>,
    pub pending: Arc<PendingArena>,
    progress: mpsc::Sender<ToolProgress>,
}

impl ToolContext {
    pub fn new(
        principal: Principal,
        rooms: Arc<dyn RoomStore>,
        documents: Arc<dyn DocumentStore>,
        provider: Arc<dyn ChatProvider>,
        pending: Arc<PendingArena>,
        progress: mpsc::Sender<ToolProgress>,
    ) -> Self {
        Self {
            principal,
            rooms,
            documents,
            provider,
            pending,
            progress,
        }
    }

    /// Emits a progress event. A closed receiver means the client stream is
    /// gone; the tool keeps running to completion regardless.
    pub(crate) async fn emit(&self, event: ToolProgress) {
        let _ = self.progress.send(event).await;
    }
}
