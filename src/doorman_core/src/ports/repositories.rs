use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    session::{Session, SessionId},
    user::{User, UserId},
    verification_code::{VerificationCode, VerificationCodeId, VerificationCodeKind},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Owns User records. Passwords are hashed behind this boundary; the
/// raw value goes in, only the comparison result comes out.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates an unverified account. Fails with `UserAlreadyExists` if
    /// the email is taken; the check-and-insert must be atomic.
    async fn create_user(
        &self,
        email: Email,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Constant-time-safe comparison of a candidate password against
    /// the stored hash. Never reverses the hash.
    async fn compare_password(
        &self,
        user: &User,
        candidate: &Password,
    ) -> Result<bool, UserStoreError>;

    /// Flips the verified flag. `UserNotFound` if the account vanished.
    async fn set_verified(&self, id: UserId, now: DateTime<Utc>) -> Result<User, UserStoreError>;

    /// Re-hashes and stores a new password.
    async fn set_password(
        &self,
        id: UserId,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SessionNotFound, Self::SessionNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Owns Session records. Expiry is a read-time concern: callers pass
/// `now` and dead sessions are filtered or rejected, never reaped here.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(
        &self,
        user_id: UserId,
        user_agent: Option<String>,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, SessionStoreError>;

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Sessions with `expires_at > now`, newest first.
    async fn find_active_by_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionStoreError>;

    async fn extend_expiry(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError>;

    /// Idempotent delete; removing an absent session succeeds.
    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// Atomic find-and-delete scoped to the owning user.
    /// `SessionNotFound` when no session matches both id and owner.
    async fn delete_owned(&self, id: SessionId, user_id: UserId)
    -> Result<(), SessionStoreError>;

    /// Removes every session for the user, returning how many existed.
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError>;
}

// VerificationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationCodeStoreError {
    #[error("Verification code not found")]
    CodeNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for VerificationCodeStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::CodeNotFound, Self::CodeNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Owns one-time codes. "Wrong type", "expired" and "nonexistent" are
/// deliberately indistinguishable to callers.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    async fn create(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, VerificationCodeStoreError>;

    /// Matches id AND kind AND `expires_at > now`; anything else is
    /// `None`.
    async fn find_valid(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError>;

    /// Codes of the given kind created for the user since `since`.
    async fn count_recent_for_user(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError>;

    /// Deletes the code. Called after the protected mutation has been
    /// applied; deleting an already-consumed code is a no-op.
    async fn consume(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError>;
}
