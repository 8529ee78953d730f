//! Guard Error Types
//!
//! Guard-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::InvalidSession;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

/// Guard-specific result type alias
pub type GuardResult<T> = Result<T, GuardError>;

#[derive(Debug, Error)]
pub enum GuardError {
    /// Session data absent or unusable
    #[error("Not authenticated (session {0})")]
    Unauthenticated(InvalidSession),

    /// Durable storage failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Path exclusion pattern did not compile
    #[error("Invalid path exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GuardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GuardError::Storage(_)
            | GuardError::Serialization(_)
            | GuardError::InvalidPattern(_)
            | GuardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GuardError::Unauthenticated(_) => ErrorKind::Unauthorized,
            GuardError::Storage(_)
            | GuardError::Serialization(_)
            | GuardError::InvalidPattern(_)
            | GuardError::Config(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, keeping the underlying error as its source
    pub fn into_app_error(self) -> AppError {
        let app = AppError::new(self.kind(), self.to_string());
        match self {
            GuardError::Unauthenticated(_) => app.with_action("Please login to access this page"),
            GuardError::Storage(e) => app.with_source(e),
            GuardError::Serialization(e) => app.with_source(e),
            GuardError::InvalidPattern(e) => app.with_source(e),
            GuardError::Config(_) => app,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GuardError::Unauthenticated(reason) => {
                tracing::debug!(reason = %reason, "Unauthenticated request");
            }
            GuardError::Storage(e) => {
                tracing::error!(error = %e, "Session storage error");
            }
            _ => {
                tracing::error!(error = %self, "Guard internal error");
            }
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
