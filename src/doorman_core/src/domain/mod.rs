pub mod email;
pub mod password;
pub mod session;
pub mod user;
pub mod verification_code;

use thiserror::Error;

/// Validation failures for inbound credential material.
///
/// The transport layer is expected to validate request shapes, but the
/// domain re-checks the invariants it depends on rather than trusting
/// the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be between {min} and {max} characters", min = password::MIN_PASSWORD_LENGTH, max = password::MAX_PASSWORD_LENGTH)]
    InvalidPassword,
}
