use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::accounts::StoreError;
use crate::llm_client::GeneratorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The body is always `{"error": "<message>"}`; internal detail is logged, never returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Generator failure on an endpoint that reports it as an error.
    /// The first field is the caller-facing message.
    #[error("Generator error: {1}")]
    Generator(&'static str, #[source] GeneratorError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        AppError::Validation("Invalid JSON".to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => AppError::Validation(msg),
            StoreError::DuplicateEmail => {
                AppError::Conflict("Email already registered".to_string())
            }
            StoreError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Generator(..) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Generator(msg, _) => (*msg).to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Generator(_, e) => tracing::error!("Generator error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_http_statuses() {
        assert_eq!(
            AppError::from(StoreError::DuplicateEmail).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(StoreError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(StoreError::Validation("Missing required fields".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("disk exploded at /var/secret"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_generator_error_uses_fixed_message() {
        let err = AppError::Generator("AI service error", GeneratorError::EmptyCandidate);
        assert_eq!(err.public_message(), "AI service error");
    }
}
