// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loading for the Roomops assistant.
//!
//! TOML files merge in XDG order with `ROOMOPS_*` environment variable
//! overrides on top. All structs use `deny_unknown_fields` so a typoed
//! config key fails loudly at startup instead of being silently ignored.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_str};
pub use model::OpsConfig;
