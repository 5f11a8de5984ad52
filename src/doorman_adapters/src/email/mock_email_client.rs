use doorman_core::{EmailClient, EmailClientError, EmailId, EmailMessage};
use uuid::Uuid;

/// Accepts everything and logs the subject. For local runs without a
/// mail provider.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send(&self, message: EmailMessage) -> Result<EmailId, EmailClientError> {
        tracing::debug!(subject = %message.subject, "mock email client dropped a message");
        Ok(EmailId(Uuid::new_v4().to_string()))
    }
}
