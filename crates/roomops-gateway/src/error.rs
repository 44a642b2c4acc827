// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps [`OpsError`] to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roomops_core::OpsError;
use serde_json::json;

/// Wrapper giving [`OpsError`] an HTTP shape. Handlers return
/// `Result<_, ApiError>` and use `?` on store and protocol calls.
#[derive(Debug)]
pub struct ApiError(pub OpsError);

impl From<OpsError> for ApiError {
    fn from(e: OpsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            OpsError::Unauthorized => StatusCode::UNAUTHORIZED,
            OpsError::NotFound { .. } => StatusCode::NOT_FOUND,
            OpsError::InvalidField(_) | OpsError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
