use thiserror::Error;

use crate::domain::{session::SessionId, user::UserId};

/// Claim set of a short-lived access token. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Claim set of a long-lived refresh token. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTokenClaims {
    pub session_id: SessionId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Good signature, past its expiry. Surfaced with a different
    /// message than [`TokenError::Invalid`] so clients can attempt a
    /// silent refresh.
    #[error("Token expired")]
    Expired,
    /// Bad signature, malformed token, or wrong audience.
    #[error("Invalid token")]
    Invalid,
    #[error("Unexpected token error: {0}")]
    Unexpected(String),
}

/// Stateless signing and verification of the two token classes.
///
/// Access and refresh tokens are signed with independent secrets, so a
/// leaked access secret cannot forge long-lived refresh tokens and vice
/// versa. `verify_*` never panics; every failure comes back as a
/// [`TokenError`].
pub trait TokenCodec: Send + Sync {
    fn sign_access(&self, claims: &AccessTokenClaims) -> Result<String, TokenError>;
    fn sign_refresh(&self, claims: &RefreshTokenClaims) -> Result<String, TokenError>;
    fn verify_access(&self, token: &str) -> Result<AccessTokenClaims, TokenError>;
    fn verify_refresh(&self, token: &str) -> Result<RefreshTokenClaims, TokenError>;
}
