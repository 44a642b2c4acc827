// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway built on axum.
//!
//! All `/v1` routes sit behind bearer-token auth (fail-closed when no token
//! is configured); `GET /health` is public. Chat turns stream back as
//! Server-Sent Events, everything else is plain JSON.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod sse;

pub use auth::AuthConfig;
pub use server::{GatewayState, ServerConfig, router, start_server};
