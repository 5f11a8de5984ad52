use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use doorman_application::LogoutUseCase;
use serde_json::json;

use crate::cookies::{ACCESS_TOKEN_COOKIE, access_removal_cookie, refresh_removal_cookie};
use crate::error::ApiError;
use crate::state::AppState;

/// Best-effort: an absent or bad access token still clears the cookies
/// and reports success.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    let use_case = LogoutUseCase::new(state.session_store.as_ref(), state.token_codec.as_ref());
    use_case.execute(access_token.as_deref()).await?;

    let jar = jar.add(access_removal_cookie()).add(refresh_removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Logout successful" })),
    ))
}
