// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roomops serve` command implementation.
//!
//! Wires the SQLite store, Anthropic provider, pending-update arena,
//! orchestrator, and HTTP gateway together, then serves until SIGINT or
//! SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use roomops_agent::{Orchestrator, OrchestratorOptions, shutdown};
use roomops_anthropic::{AnthropicClient, AnthropicProvider};
use roomops_config::OpsConfig;
use roomops_confirm::PendingArena;
use roomops_core::OpsError;
use roomops_gateway::{AuthConfig, GatewayState, ServerConfig, start_server};
use roomops_store::SqliteStore;
use tracing::{info, warn};

pub async fn run_serve(config: OpsConfig) -> Result<(), OpsError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting roomops serve");

    let api_key = config
        .anthropic
        .api_key
        .as_deref()
        .ok_or_else(|| {
            OpsError::Config(
                "anthropic.api_key is not set (ROOMOPS_ANTHROPIC_API_KEY)".to_string(),
            )
        })?;
    let client = AnthropicClient::new(api_key, &config.anthropic.api_version)?;
    let provider = Arc::new(AnthropicProvider::new(
        client,
        config.anthropic.model.clone(),
        config.anthropic.title_model.clone(),
    ));

    let store = Arc::new(SqliteStore::open(&config.storage.database_path).await?);
    info!(path = %config.storage.database_path, "store opened");

    let pending = Arc::new(PendingArena::new(Duration::from_secs(
        config.confirm.pending_ttl_secs,
    )));

    let mut options = OrchestratorOptions {
        max_tool_rounds: config.agent.max_tool_rounds,
        max_tokens: config.anthropic.max_tokens,
        ..OrchestratorOptions::default()
    };
    if let Some(prompt) = &config.agent.system_prompt {
        options.system_prompt = prompt.clone();
    }
    let orchestrator = Arc::new(Orchestrator::new(
        provider,
        store.clone(),
        store.clone(),
        store.clone(),
        pending.clone(),
        options,
    ));

    if config.server.bearer_token.is_none() {
        warn!("server.bearer_token is not set; all API requests will be rejected");
    }
    let state = GatewayState {
        orchestrator,
        transcripts: store.clone(),
        rooms: store.clone(),
        pending: pending.clone(),
        auth: AuthConfig {
            bearer_token: config.server.bearer_token.clone(),
        },
        start_time: std::time::Instant::now(),
    };

    let cancel = shutdown::install_signal_handler();

    // Expired tokens are purged in the background so abandoned proposals
    // do not accumulate.
    let purge_cancel = cancel.clone();
    let purge_arena = pending.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            tokio::select! {
                _ = interval.tick() => purge_arena.purge_expired(),
                _ = purge_cancel.cancelled() => break,
            }
        }
    });

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state, cancel).await?;

    info!("roomops serve shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roomops={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
