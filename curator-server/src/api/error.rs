//! HTTP mapping for [`AppError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use curator_client::ClientError;
use curator_core::AppError;
use serde_json::json;

/// Handler error: a status code plus a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Replace the message of server-side failures with a generic one,
    /// keeping client errors (404/422) as they are.
    pub fn context(self, message: &str) -> Self {
        if self.status.is_server_error() {
            Self { message: message.to_string(), ..self }
        } else {
            self
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = match &err {
            AppError::NotFound(_) | AppError::Backend(ClientError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            },
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("[API] {}", err);
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(AppError::not_found("video", "x"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from(AppError::invalid("email", "must be a valid address"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "Validation error: email: must be a valid address");

        let err = ApiError::from(AppError::from(ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);

        let err = ApiError::from(AppError::from(ClientError::NotFound("channel".to_string())));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_context_only_hides_server_errors() {
        let hidden = ApiError::new(StatusCode::BAD_GATEWAY, "Backend error: secret")
            .context("Failed to load videos");
        assert_eq!(hidden.message, "Failed to load videos");

        let kept = ApiError::new(StatusCode::NOT_FOUND, "video not found: x").context("Failed");
        assert_eq!(kept.message, "video not found: x");
    }
}
