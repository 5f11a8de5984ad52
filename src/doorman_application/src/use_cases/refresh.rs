use doorman_core::{
    AccessTokenClaims, AuthError, AuthPolicy, Clock, RefreshTokenClaims, SessionStore, TokenCodec,
    TokenError,
};

use crate::use_cases::RefreshedTokens;

/// Refresh use case - mints a new access token and applies the sliding
/// session renewal policy.
///
/// A structurally valid refresh token referencing a deleted or expired
/// session is rejected; the server-side session record is the
/// revocation authority, not the signature.
pub struct RefreshUseCase<'a> {
    session_store: &'a dyn SessionStore,
    token_codec: &'a dyn TokenCodec,
    clock: &'a dyn Clock,
    policy: AuthPolicy,
}

impl<'a> RefreshUseCase<'a> {
    pub fn new(
        session_store: &'a dyn SessionStore,
        token_codec: &'a dyn TokenCodec,
        clock: &'a dyn Clock,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            session_store,
            token_codec,
            clock,
            policy,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshedTokens, AuthError> {
        let claims = self
            .token_codec
            .verify_refresh(refresh_token)
            .map_err(|error| match error {
                TokenError::Expired => AuthError::unauthorized("Refresh token expired"),
                TokenError::Invalid => AuthError::unauthorized("Invalid refresh token"),
                TokenError::Unexpected(detail) => AuthError::internal(detail),
            })?;

        let now = self.clock.now();
        let session = self
            .session_store
            .find_by_id(claims.session_id)
            .await?
            .filter(|session| !session.is_expired(now))
            .ok_or_else(|| AuthError::unauthorized("Session expired"))?;

        // Sliding renewal: only a session inside the renewal window is
        // extended, and only then is the refresh token rotated. This
        // keeps steady-state refreshes from churning out new tokens.
        let needs_renewal = session.expires_at - now < self.policy.session_renewal_window;
        let new_refresh_token = if needs_renewal {
            self.session_store
                .extend_expiry(session.id, now + self.policy.session_ttl)
                .await?;
            let token = self
                .token_codec
                .sign_refresh(&RefreshTokenClaims {
                    session_id: session.id,
                })
                .map_err(|error| AuthError::internal(error.to_string()))?;
            Some(token)
        } else {
            None
        };

        let access_token = self
            .token_codec
            .sign_access(&AccessTokenClaims {
                session_id: session.id,
                user_id: session.user_id,
            })
            .map_err(|error| AuthError::internal(error.to_string()))?;

        Ok(RefreshedTokens {
            access_token,
            new_refresh_token,
        })
    }
}
