/// Error types for the tea-feed service
///
/// Every outward-facing failure maps to a stable (status code, machine
/// readable reason, human message) triple. `DependencyUnavailable` is the
/// retryable-by-caller condition; it is never folded into another kind.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for tea-feed operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input that got past routing (bad identifiers, invalid category)
    #[error("{0}")]
    Validation(String),

    /// Referenced post or category does not exist
    #[error("{0}")]
    NotFound(String),

    /// Fixed-window request threshold exceeded
    #[error("rate limit exceeded")]
    RateLimited,

    /// Backing store unreachable or timed out; retryable by the caller
    #[error("{0}")]
    DependencyUnavailable(String),

    /// Unexpected fault
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable reason attached to every error response.
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::RateLimited => "rate_limited",
            AppError::DependencyUnavailable(_) => "dependency_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "statusCode": status.as_u16(),
            "error": self.reason(),
            "message": self.to_string(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Tls(_) => {
                AppError::DependencyUnavailable(format!("database unavailable: {}", err))
            }
            other => AppError::Internal(format!("database error: {}", other)),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::DependencyUnavailable(format!("counter store unavailable: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization error: {}", err))
    }
}
