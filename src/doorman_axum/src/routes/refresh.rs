use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use doorman_application::RefreshUseCase;
use doorman_core::AuthError;
use serde_json::json;

use crate::cookies::{REFRESH_TOKEN_COOKIE, access_token_cookie, refresh_token_cookie};
use crate::error::ApiError;
use crate::state::AppState;

#[tracing::instrument(name = "Refresh access token", skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| ApiError::from(AuthError::unauthorized("Missing refresh token")))?;

    let use_case = RefreshUseCase::new(
        state.session_store.as_ref(),
        state.token_codec.as_ref(),
        state.clock.as_ref(),
        state.policy,
    );
    let tokens = use_case.execute(&refresh_token).await?;

    let mut jar = jar.add(access_token_cookie(
        tokens.access_token,
        state.access_token_ttl,
    ));
    // Rotated only when the session was renewed.
    if let Some(new_refresh_token) = tokens.new_refresh_token {
        jar = jar.add(refresh_token_cookie(
            new_refresh_token,
            state.policy.session_ttl,
        ));
    }

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Access token refreshed" })),
    ))
}
