use doorman_core::{
    AuthError, Clock, Password, SessionStore, UserStore, UserStoreError, UserView,
    VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
};

/// Reset-password use case - consumes a reset code, replaces the
/// credential and revokes every session of the user.
///
/// Deleting all sessions is the containment step: whoever requested the
/// reset may have done so because the credential was compromised, so
/// every logged-in device is forced back through login.
pub struct ResetPasswordUseCase<'a> {
    user_store: &'a dyn UserStore,
    session_store: &'a dyn SessionStore,
    code_store: &'a dyn VerificationCodeStore,
    clock: &'a dyn Clock,
}

impl<'a> ResetPasswordUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        session_store: &'a dyn SessionStore,
        code_store: &'a dyn VerificationCodeStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            user_store,
            session_store,
            code_store,
            clock,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        code_id: VerificationCodeId,
        new_password: Password,
    ) -> Result<UserView, AuthError> {
        let now = self.clock.now();

        let code = self
            .code_store
            .find_valid(code_id, VerificationCodeKind::PasswordReset, now)
            .await?
            .ok_or_else(|| AuthError::not_found("Invalid or expired verification code"))?;

        let user = self
            .user_store
            .set_password(code.user_id, new_password, now)
            .await
            .map_err(|error| match error {
                UserStoreError::UserNotFound => AuthError::internal("Failed to reset password"),
                other => other.into(),
            })?;

        // The credential is durably replaced; now burn the code and
        // cascade-delete the sessions. The store offers no native
        // cascade, so the orchestrator owns this step.
        self.code_store.consume(code.id).await?;
        self.session_store.delete_all_for_user(user.id).await?;

        Ok(user.omit_password())
    }
}
