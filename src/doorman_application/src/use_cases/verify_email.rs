use doorman_core::{
    AuthError, Clock, UserStore, UserStoreError, UserView, VerificationCodeId,
    VerificationCodeKind, VerificationCodeStore,
};

/// Verify-email use case - consumes an email-verification code and
/// flips the account's verified flag.
pub struct VerifyEmailUseCase<'a> {
    user_store: &'a dyn UserStore,
    code_store: &'a dyn VerificationCodeStore,
    clock: &'a dyn Clock,
}

impl<'a> VerifyEmailUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        code_store: &'a dyn VerificationCodeStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            user_store,
            code_store,
            clock,
        }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, code_id: VerificationCodeId) -> Result<UserView, AuthError> {
        let now = self.clock.now();

        let code = self
            .code_store
            .find_valid(code_id, VerificationCodeKind::EmailVerification, now)
            .await?
            .ok_or_else(|| AuthError::not_found("Invalid or expired verification code"))?;

        let user = self
            .user_store
            .set_verified(code.user_id, now)
            .await
            .map_err(|error| match error {
                UserStoreError::UserNotFound => AuthError::internal("Failed to verify email"),
                other => other.into(),
            })?;

        // Consume only after the flag is durably set; if the update
        // fails the code stays valid and the link can be retried.
        self.code_store.consume(code.id).await?;

        Ok(user.omit_password())
    }
}
