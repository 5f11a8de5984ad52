use serde::Serialize;
use thiserror::Error;

use crate::ports::repositories::{SessionStoreError, UserStoreError, VerificationCodeStoreError};
use crate::ports::services::EmailClientError;

/// HTTP-status-like severity class of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Duplicate email at registration.
    Conflict,
    /// Bad credentials, bad/expired/missing token, dead session.
    Unauthorized,
    /// Missing user/session/code. All "code invalid or expired" cases
    /// collapse here so callers cannot probe for live codes.
    NotFound,
    /// Password-reset request rate limit.
    TooManyRequests,
    /// Downstream failure, or an update that matched nothing.
    Internal,
}

/// Machine-readable subcode attached to selected errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppErrorCode {
    /// Lets clients tell "access token invalid/expired" apart from
    /// other 401s and trigger a silent refresh.
    InvalidAccessToken,
}

/// Structured, typed error raised by the auth flows.
///
/// Replaces the dynamic assert-throws control flow of the original
/// service: every user-facing precondition raises one of these
/// immediately, and no flow continues past a failed guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
    pub code: Option<AppErrorCode>,
}

impl AuthError {
    fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::NotFound, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::TooManyRequests, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Internal, message)
    }

    pub fn with_code(mut self, code: AppErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}

impl From<UserStoreError> for AuthError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => Self::conflict("Email already in use"),
            UserStoreError::UserNotFound => Self::not_found("User not found"),
            UserStoreError::Unexpected(detail) => Self::internal(detail),
        }
    }
}

impl From<SessionStoreError> for AuthError {
    fn from(error: SessionStoreError) -> Self {
        match error {
            SessionStoreError::SessionNotFound => Self::not_found("Session not found"),
            SessionStoreError::Unexpected(detail) => Self::internal(detail),
        }
    }
}

impl From<VerificationCodeStoreError> for AuthError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::CodeNotFound => {
                Self::not_found("Invalid or expired verification code")
            }
            VerificationCodeStoreError::Unexpected(detail) => Self::internal(detail),
        }
    }
}

impl From<EmailClientError> for AuthError {
    fn from(error: EmailClientError) -> Self {
        Self::internal(error.to_string())
    }
}
