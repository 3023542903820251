//! Unified error types for curator core.

use curator_client::ClientError;
use curator_types::{ConfigError, ContentError};
use serde::Serialize;
use thiserror::Error;

/// Main error type for content and admin operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Backend or YouTube request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),

    /// Requested row does not exist or is not publicly visible.
    #[error("{0}")]
    NotFound(String),

    /// Caller input was rejected before anything was sent.
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn not_found(kind: &str, key: &str) -> Self {
        Self::from(ContentError::not_found(kind, key))
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Whether the underlying backend looks paused for inactivity.
    pub fn is_suspension(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_suspension())
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound { .. } => Self::NotFound(err.to_string()),
            ContentError::ValidationError { field, message } => Self::Validation { field, message },
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for curator operations.
pub type AppResult<T> = Result<T, AppError>;
