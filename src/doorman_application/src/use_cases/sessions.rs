use doorman_core::{
    AuthError, Clock, SessionId, SessionStore, SessionStoreError, SessionView, UserId,
};

/// List-sessions use case - the caller's active sessions, newest first,
/// with the one backing the current request flagged.
pub struct ListSessionsUseCase<'a> {
    session_store: &'a dyn SessionStore,
    clock: &'a dyn Clock,
}

impl<'a> ListSessionsUseCase<'a> {
    pub fn new(session_store: &'a dyn SessionStore, clock: &'a dyn Clock) -> Self {
        Self {
            session_store,
            clock,
        }
    }

    #[tracing::instrument(name = "ListSessionsUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        user_id: UserId,
        current_session_id: SessionId,
    ) -> Result<Vec<SessionView>, AuthError> {
        let sessions = self
            .session_store
            .find_active_by_user(user_id, self.clock.now())
            .await?;

        Ok(sessions
            .into_iter()
            .map(|session| SessionView {
                id: session.id,
                user_agent: session.user_agent,
                created_at: session.created_at,
                is_current: session.id == current_session_id,
            })
            .collect())
    }
}

/// Delete-session use case - revoke one of the caller's own sessions.
pub struct DeleteSessionUseCase<'a> {
    session_store: &'a dyn SessionStore,
}

impl<'a> DeleteSessionUseCase<'a> {
    pub fn new(session_store: &'a dyn SessionStore) -> Self {
        Self { session_store }
    }

    #[tracing::instrument(name = "DeleteSessionUseCase::execute", skip_all)]
    pub async fn execute(&self, session_id: SessionId, user_id: UserId) -> Result<(), AuthError> {
        // Scoped to the owner: someone else's session id behaves like a
        // nonexistent one.
        self.session_store
            .delete_owned(session_id, user_id)
            .await
            .map_err(|error| match error {
                SessionStoreError::SessionNotFound => AuthError::not_found("Session not found"),
                other => other.into(),
            })
    }
}
