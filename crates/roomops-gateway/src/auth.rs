// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token authentication middleware.
//!
//! When no token is configured, every request is rejected (fail-closed).
//! A request that passes gets a [`Principal`] attached to its extensions,
//! read from the `x-user-id` / `x-user-name` headers the dashboard frontend
//! forwards with its session.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use roomops_core::Principal;

const DEFAULT_USER_ID: &str = "api-user";

/// Authentication configuration for the gateway.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected bearer token. `None` disables all authenticated routes.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Validates the bearer token and attaches the request's [`Principal`].
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected_token) = auth.bearer_token.as_deref() else {
        tracing::error!("gateway has no auth configured, rejecting request");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if token != Some(expected_token) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let principal = principal_from_headers(&request);
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn principal_from_headers(request: &Request) -> Principal {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    Principal {
        user_id: header("x-user-id").unwrap_or(DEFAULT_USER_ID).to_string(),
        name: header("x-user-name").map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_the_token() {
        let auth = AuthConfig {
            bearer_token: Some("hunter2".to_string()),
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn principal_defaults_when_headers_missing() {
        let request = Request::new(axum::body::Body::empty());
        let principal = principal_from_headers(&request);
        assert_eq!(principal.user_id, "api-user");
        assert_eq!(principal.name, None);
    }
}
