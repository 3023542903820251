//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while assembling runtime configuration.
///
/// Every variant is fatal at startup: the process must not run with a
/// partially configured backend client.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Required environment variable is not set (or is blank)
    #[error("Missing required environment variable: {var}")]
    MissingEnv {
        /// Name of the variable that was looked up
        var: String,
    },

    /// Config value is present but unusable
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::MissingEnv`].
    pub fn missing(var: impl Into<String>) -> Self {
        Self::MissingEnv { var: var.into() }
    }

    /// Shorthand for a [`ConfigError::ValidationError`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.into(), message: message.into() }
    }
}
