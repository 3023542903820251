//! Content-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by content lookups and user-submitted input.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ContentError {
    /// No visible row matched the lookup key
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Entity kind ("video", "blog post", ...)
        kind: String,
        /// Lookup key (video id, slug, row id)
        key: String,
    },

    /// Submitted input failed validation
    #[error("Validation error for {field}: {message}")]
    ValidationError {
        /// Name of the offending field
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ContentError {
    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound { kind: kind.into(), key: key.into() }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.into(), message: message.into() }
    }
}
