use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use countrycache_core::errors::Error as CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Wire shape of every error response: `error` plus an optional
/// `details` payload (field map for validation, source name for 503s).
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Core(CoreError::Validation(failure)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation failed".to_string(),
                    details: Some(json!(failure.details)),
                },
            ),
            ApiError::Core(CoreError::SourceUnavailable(source_err)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    error: "External data source unavailable".to_string(),
                    details: Some(Value::String(source_err.source().to_string())),
                },
            ),
            ApiError::Core(CoreError::NotFound) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "Country not found".to_string(),
                    details: None,
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: message.clone(),
                    details: None,
                },
            ),
            ApiError::Core(other) => {
                tracing::error!("request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".to_string(),
                        details: None,
                    },
                )
            }
            ApiError::Internal(reason) => {
                tracing::error!("internal error: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".to_string(),
                        details: None,
                    },
                )
            }
            ApiError::Anyhow(e) => {
                tracing::error!("unhandled error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
