// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router assembly and the server entry point.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use roomops_agent::Orchestrator;
use roomops_confirm::PendingArena;
use roomops_core::{OpsError, RoomStore, TranscriptStore};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<Orchestrator>,
    pub transcripts: Arc<dyn TranscriptStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub pending: Arc<PendingArena>,
    pub auth: AuthConfig,
    /// Process start time for the health endpoint's uptime.
    pub start_time: Instant,
}

/// Network configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the full router: a public health route plus the authenticated
/// `/v1` API.
pub fn router(state: GatewayState) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api = Router::new()
        .route("/v1/chat", post(handlers::post_chat))
        .route(
            "/v1/chat/{id}",
            get(handlers::get_conversation).delete(handlers::delete_conversation),
        )
        .route("/v1/rooms/info", get(handlers::get_room_info))
        .route(
            "/v1/rooms/floor-overview",
            get(handlers::get_floor_overview),
        )
        .route("/v1/rooms/update", post(handlers::post_room_update))
        .route("/v1/rooms/confirm", post(handlers::post_room_confirm))
        .route("/v1/rooms/decline", post(handlers::post_room_decline))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public)
        .merge(api)
        .layer(CorsLayer::permissive())
}

/// Binds and serves until the cancellation token fires.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), OpsError> {
    let app = router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OpsError::Config(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| OpsError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
