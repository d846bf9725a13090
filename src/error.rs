//! Error types for the holdings engine

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::firehose::MappingError;

/// Stable error codes returned in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchItem = 5,
    BadValue = 18,
    IlsUnavailable = 30,
    IlsMalformed = 31,
    HoldRejected = 40,
    RenewRejected = 41,
    Conflict = 50,
}

/// Failures talking to the ILS or to the response cache
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("connection reset by peer: {0}")]
    ConnectionReset(String),

    #[error("premature end of response: {0}")]
    PrematureEof(String),

    #[error("ILS request timed out: {0}")]
    Timeout(String),

    #[error("ILS answered HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("cache failure: {0}")]
    Cache(String),
}

impl GatewayError {
    /// Network failures the caller may retry; everything else is a logical failure
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionReset(_) | GatewayError::PrematureEof(_) | GatewayError::Timeout(_)
        )
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("ILS error: {0}")]
    Ils(#[from] GatewayError),

    #[error("Unreadable ILS response: {0}")]
    Mapping(#[from] MappingError),

    #[error("{0}")]
    Hold(String),

    #[error("{0}")]
    Renew(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone()),
            AppError::Ils(e) => {
                tracing::warn!("ILS error: {}", e);
                let status = if e.is_transient() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, ErrorCode::IlsUnavailable, "Please try again".to_string())
            }
            AppError::Mapping(e) => {
                tracing::warn!("ILS response could not be read: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorCode::IlsMalformed,
                    "No information available".to_string(),
                )
            }
            AppError::Hold(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::HoldRejected, msg.clone())
            }
            AppError::Renew(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::RenewRejected, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
