pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DomainError,
    email::Email,
    password::Password,
    session::{Session, SessionId, SessionView},
    user::{User, UserId, UserView},
    verification_code::{VerificationCode, VerificationCodeId, VerificationCodeKind},
};

pub use error::{AppErrorCode, AuthError, AuthErrorKind};

pub use policy::AuthPolicy;

pub use ports::{
    clock::{Clock, SystemClock},
    repositories::{
        SessionStore, SessionStoreError, UserStore, UserStoreError, VerificationCodeStore,
        VerificationCodeStoreError,
    },
    services::{EmailClient, EmailClientError, EmailId, EmailMessage},
    tokens::{AccessTokenClaims, RefreshTokenClaims, TokenCodec, TokenError},
};
