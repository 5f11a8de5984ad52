use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::user::UserId;

/// The code value itself: an unguessable random identifier used as the
/// lookup key, handed to the user inside an email link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VerificationCodeId(Uuid);

impl VerificationCodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for VerificationCodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for VerificationCodeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for VerificationCodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for VerificationCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which sensitive action a code gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationCodeKind {
    EmailVerification,
    PasswordReset,
}

impl VerificationCodeKind {
    /// Stable string form used by the persistence adapters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl FromStr for VerificationCodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(Self::EmailVerification),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(format!("unknown verification code kind: {other}")),
        }
    }
}

/// A one-time, typed, time-boxed token gating a sensitive action.
///
/// Consumed (deleted) on first successful use; an expired or consumed
/// code is indistinguishable from one that never existed.
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub id: VerificationCodeId,
    pub user_id: UserId,
    pub kind: VerificationCodeKind,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
