//! Error types for the curator client.

use thiserror::Error;

/// HTTP status Supabase-style gateways answer with while a project is paused.
const STATUS_PROJECT_PAUSED: u16 = 540;

/// Errors that can occur when talking to the backend or YouTube.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend body.
        message: String,
    },

    /// A serverless function ran but reported failure.
    #[error("Function {function} failed: {message}")]
    Function {
        /// Function name.
        function: String,
        /// Error message reported by the function.
        message: String,
    },

    /// Backend returned an invalid or unparseable response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Lookup returned no rows/items.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Whether this failure looks like the backend being paused for
    /// inactivity (a keep-alive ping is the recovery action).
    pub fn is_suspension(&self) -> bool {
        if let Self::Status { status, .. } = self {
            if *status == STATUS_PROJECT_PAUSED || *status == 503 {
                return true;
            }
        }
        let message = self.to_string().to_lowercase();
        message.contains("paused") || message.contains("inactive")
    }

    /// HTTP status of the failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspension_by_status() {
        let err = ClientError::Status { status: 540, message: "".to_string() };
        assert!(err.is_suspension());
        let err = ClientError::Status { status: 503, message: "unavailable".to_string() };
        assert!(err.is_suspension());
        let err = ClientError::Status { status: 500, message: "boom".to_string() };
        assert!(!err.is_suspension());
    }

    #[test]
    fn test_suspension_by_message() {
        let err = ClientError::Function {
            function: "youtube-video-sync".to_string(),
            message: "Project is PAUSED".to_string(),
        };
        assert!(err.is_suspension());
        let err = ClientError::InvalidResponse("database inactive".to_string());
        assert!(err.is_suspension());
        let err = ClientError::NotFound("channel".to_string());
        assert!(!err.is_suspension());
    }
}
