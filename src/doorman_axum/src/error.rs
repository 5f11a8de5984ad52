use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doorman_core::{AppErrorCode, AuthError, AuthErrorKind, DomainError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<AppErrorCode>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Auth(AuthError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::Auth(error)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message, error_code) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Auth(error) => {
                let status_code = match error.kind {
                    AuthErrorKind::Conflict => StatusCode::CONFLICT,
                    AuthErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
                    AuthErrorKind::NotFound => StatusCode::NOT_FOUND,
                    AuthErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
                    AuthErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };

                // Downstream detail stays in the logs.
                let message = if error.kind == AuthErrorKind::Internal {
                    tracing::error!(detail = %error.message, "internal error");
                    "Internal server error".to_string()
                } else {
                    error.message
                };

                (status_code, message, error.code)
            }
        };

        let body = Json(ErrorResponse {
            message,
            error_code,
        });
        (status_code, body).into_response()
    }
}
