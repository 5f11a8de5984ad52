use doorman_core::{
    AccessTokenClaims, AuthError, AuthPolicy, Clock, Email, Password, RefreshTokenClaims,
    SessionStore, TokenCodec, UserStore,
};

use crate::use_cases::AuthenticatedUser;

/// Login use case - verifies credentials, opens a session and issues a
/// token pair.
pub struct LoginUseCase<'a> {
    user_store: &'a dyn UserStore,
    session_store: &'a dyn SessionStore,
    token_codec: &'a dyn TokenCodec,
    clock: &'a dyn Clock,
    policy: AuthPolicy,
}

impl<'a> LoginUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        session_store: &'a dyn SessionStore,
        token_codec: &'a dyn TokenCodec,
        clock: &'a dyn Clock,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            user_store,
            session_store,
            token_codec,
            clock,
            policy,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        user_agent: Option<String>,
    ) -> Result<AuthenticatedUser, AuthError> {
        // Unknown email and wrong password produce the same message so
        // the endpoint cannot be used to enumerate accounts.
        let user = self
            .user_store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::unauthorized("Invalid email or password"))?;

        let matches = self.user_store.compare_password(&user, &password).await?;
        if !matches {
            return Err(AuthError::unauthorized("Invalid email or password"));
        }

        let now = self.clock.now();
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
