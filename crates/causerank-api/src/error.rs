//! API error taxonomy
//!
//! Validation failures are the client's fault and terminate the
//! request before any task is dispatched; computation failures and
//! timeouts surface as server-side errors instead of leaving the
//! request suspended; an overloaded pool asks the client to retry.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use causerank::pool::PoolError;
use causerank_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("answer computation failed: {0}")]
    Compute(String),

    #[error("answer computation timed out")]
    Timeout,

    #[error("server is overloaded, retry later")]
    Overloaded,
}

impl From<PoolError> for ApiError {
    fn from(e: PoolError) -> Self {
        match e {
            PoolError::Overloaded => ApiError::Overloaded,
            PoolError::Timeout(_) => ApiError::Timeout,
            PoolError::Closed | PoolError::Worker(_) => ApiError::Compute(e.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidQuery(msg) => ApiError::Validation(msg),
            CoreError::Compute(msg) => ApiError::Compute(msg),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Compute(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        if matches!(self, ApiError::Overloaded) {
            (status, [(header::RETRY_AFTER, "1")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
