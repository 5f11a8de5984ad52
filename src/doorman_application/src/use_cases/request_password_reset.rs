use doorman_core::{
    AuthError, AuthErrorKind, AuthPolicy, Clock, Email, EmailClient, UserStore,
    VerificationCodeKind, VerificationCodeStore,
};

use crate::email_templates;

/// Request-password-reset use case - rate-limited issuance of a reset
/// code delivered by email.
///
/// Apart from the rate limit, the caller always sees a soft success:
/// whether the account exists or the email went out is never revealed
/// by this endpoint.
pub struct RequestPasswordResetUseCase<'a> {
    user_store: &'a dyn UserStore,
    code_store: &'a dyn VerificationCodeStore,
    email_client: &'a dyn EmailClient,
    clock: &'a dyn Clock,
    policy: AuthPolicy,
    app_origin: &'a str,
}

impl<'a> RequestPasswordResetUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        code_store: &'a dyn VerificationCodeStore,
        email_client: &'a dyn EmailClient,
        clock: &'a dyn Clock,
        policy: AuthPolicy,
        app_origin: &'a str,
    ) -> Self {
        Self {
            user_store,
            code_store,
            email_client,
            clock,
            policy,
            app_origin,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), AuthError> {
        match self.issue_reset_code(email).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind == AuthErrorKind::TooManyRequests => Err(error),
            Err(error) => {
                tracing::warn!(%error, "password reset request failed");
                Ok(())
            }
        }
    }

    async fn issue_reset_code(&self, email: Email) -> Result<(), AuthError> {
        let now = self.clock.now();

        let user = self
            .user_store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::not_found("User not found"))?;

        let since = now - self.policy.reset_request_window;
        let recent = self
            .code_store
            .count_recent_for_user(user.id, VerificationCodeKind::PasswordReset, since)
            .await?;
        if recent > self.policy.max_recent_reset_requests {
            return Err(AuthError::too_many_requests(
                "Too many requests, please try again later",
            ));
        }

        let expires_at = now + self.policy.password_reset_ttl;
        let code = self
            .code_store
            .create(user.id, VerificationCodeKind::PasswordReset, now, expires_at)
            .await?;

        let url = format!(
            "{}/password/reset?code={}&exp={}",
            self.app_origin,
            code.id,
            expires_at.timestamp_millis()
        );
        let message = email_templates::password_reset_message(user.email.clone(), &url);
        let email_id = self.email_client.send(message).await?;
        if email_id.0.is_empty() {
            return Err(AuthError::internal(
                "Email provider returned no message id",
            ));
        }

        Ok(())
    }
}
