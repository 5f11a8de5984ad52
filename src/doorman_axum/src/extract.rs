use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use doorman_core::{AppErrorCode, AuthError, SessionId, TokenError, UserId};

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Guard extractor: proves the request carried a valid access token.
///
/// Purely stateless; the session's continued existence is only checked
/// where a handler actually touches it.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub session_id: SessionId,
}

impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(ACCESS_TOKEN_COOKIE).map(|cookie| cookie.value());

        let Some(token) = token else {
            return Err(unauthorized("Not authorized"));
        };

        let claims = state.token_codec.verify_access(token).map_err(|error| {
            let message = match error {
                TokenError::Expired => "Token expired",
                _ => "Invalid token",
            };
            unauthorized(message)
        })?;

        Ok(Self {
            user_id: claims.user_id,
            session_id: claims.session_id,
        })
    }
}

fn unauthorized(message: &str) -> ApiError {
    // The subcode lets clients distinguish this 401 and attempt a
    // silent refresh.
    ApiError::from(AuthError::unauthorized(message).with_code(AppErrorCode::InvalidAccessToken))
}
