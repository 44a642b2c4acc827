// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./roomops.toml` > `~/.config/roomops/roomops.toml` >
//! `/etc/roomops/roomops.toml` with `ROOMOPS_*` environment overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::OpsConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/roomops/roomops.toml` (system-wide)
/// 3. `~/.config/roomops/roomops.toml` (user XDG config)
/// 4. `./roomops.toml` (local directory)
/// 5. `ROOMOPS_*` environment variables
pub fn load_config() -> Result<OpsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OpsConfig::default()))
        .merge(Toml::file("/etc/roomops/roomops.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("roomops/roomops.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("roomops.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for tests and embedded configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<OpsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OpsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ROOMOPS_ANTHROPIC_API_KEY` must map
/// to `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ROOMOPS_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("confirm_", "confirm.", 1);
        mapped.into()
    })
}
