use doorman_core::{
    AccessTokenClaims, AuthError, AuthPolicy, Clock, Email, EmailClient, Password,
    RefreshTokenClaims, SessionStore, TokenCodec, UserStore, VerificationCodeKind,
    VerificationCodeStore,
};

use crate::email_templates;
use crate::use_cases::AuthenticatedUser;

/// Register use case - creates the account, its first session and the
/// email-verification code, then issues the initial token pair.
pub struct RegisterUseCase<'a> {
    user_store: &'a dyn UserStore,
    session_store: &'a dyn SessionStore,
    code_store: &'a dyn VerificationCodeStore,
    email_client: &'a dyn EmailClient,
    token_codec: &'a dyn TokenCodec,
    clock: &'a dyn Clock,
    policy: AuthPolicy,
    app_origin: &'a str,
}

impl<'a> RegisterUseCase<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_store: &'a dyn UserStore,
        session_store: &'a dyn SessionStore,
        code_store: &'a dyn VerificationCodeStore,
        email_client: &'a dyn EmailClient,
        token_codec: &'a dyn TokenCodec,
        clock: &'a dyn Clock,
        policy: AuthPolicy,
        app_origin: &'a str,
    ) -> Self {
        Self {
            user_store,
            session_store,
            code_store,
            email_client,
            token_codec,
            clock,
            policy,
            app_origin,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        user_agent: Option<String>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let now = self.clock.now();

        // Conflict on duplicate email comes straight from the store's
        // atomic check-and-insert.
        let user = self.user_store.create_user(email, password, now).await?;

        let code = self
            .code_store
            .create(
                user.id,
                VerificationCodeKind::EmailVerification,
                now,
                now + self.policy.email_verification_ttl,
            )
            .await?;

        // A failed verification email must not fail the registration;
        // account creation is decoupled from mail deliverability.
        let url = format!("{}/email/verify/{}", self.app_origin, code.id);
        let message = email_templates::verify_email_message(user.email.clone(), &url);
        if let Err(error) = self.email_client.send(message).await {
            tracing::warn!(%error, "failed to send verification email");
        }

        let session = self
            .session_store
            .create(user.id, user_agent, now, now + self.policy.session_ttl)
            .await?;

        let refresh_token = self
            .token_codec
            .sign_refresh(&RefreshTokenClaims {
                session_id: session.id,
            })
            .map_err(|error| AuthError::internal(error.to_string()))?;
        let access_token = self
            .token_codec
            .sign_access(&AccessTokenClaims {
                session_id: session.id,
                user_id: user.id,
            })
            .map_err(|error| AuthError::internal(error.to_string()))?;

        Ok(AuthenticatedUser {
            user: user.omit_password(),
            access_token,
            refresh_token,
        })
    }
}
