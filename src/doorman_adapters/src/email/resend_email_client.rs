use doorman_core::{EmailClient, EmailClientError, EmailId, EmailMessage};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

pub struct ResendEmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    api_key: Secret<String>,
}

impl ResendEmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        api_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for ResendEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all, fields(subject = %message.subject))]
    async fn send(&self, message: EmailMessage) -> Result<EmailId, EmailClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| EmailClientError::Transport(e.to_string()))?;
        let url = base
            .join("/emails")
            .map_err(|e| EmailClientError::Transport(e.to_string()))?;

        let request_body = SendEmailRequest {
            from: &self.sender,
            to: message.to.expose(),
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
        };

        let response = self
            .http_client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmailClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EmailClientError::Rejected(response.status().to_string()));
        }

        let body: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| EmailClientError::Transport(e.to_string()))?;

        match body.id {
            Some(id) if !id.is_empty() => Ok(EmailId(id)),
            _ => Err(EmailClientError::MissingMessageId),
        }
    }
}

#[derive(serde::Serialize, Debug)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}
