use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::Email;

/// Provider-assigned id of an accepted message. Its presence is the
/// proof of handoff; a success response without one is treated as a
/// failure by the password-reset flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailId(pub String);

/// An outbound email, fully rendered.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Email,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
    #[error("Email provider response is missing a message id")]
    MissingMessageId,
    #[error("Email transport error: {0}")]
    Transport(String),
}

/// Port trait for the outbound mail collaborator.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<EmailId, EmailClientError>;
}
