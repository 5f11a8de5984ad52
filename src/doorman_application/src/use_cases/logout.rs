use doorman_core::{AuthError, SessionStore, TokenCodec};

/// Logout use case - best-effort session invalidation.
///
/// Logout never fails because of a missing or stale token; there is
/// simply nothing left to invalidate.
pub struct LogoutUseCase<'a> {
    session_store: &'a dyn SessionStore,
    token_codec: &'a dyn TokenCodec,
}

impl<'a> LogoutUseCase<'a> {
    pub fn new(session_store: &'a dyn SessionStore, token_codec: &'a dyn TokenCodec) -> Self {
        Self {
            session_store,
            token_codec,
        }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, access_token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = access_token else {
            return Ok(());
        };

        if let Ok(claims) = self.token_codec.verify_access(token) {
            self.session_store.delete(claims.session_id).await?;
        }

        Ok(())
    }
}
