use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use doorman_application::RegisterUseCase;
use doorman_core::{Email, Password};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::user_agent;
use crate::cookies::{access_token_cookie, refresh_token_cookie};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.password.expose_secret() != request.confirm_password.expose_secret() {
        return Err(ApiError::bad_request("Passwords do not match"));
    }

    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        state.user_store.as_ref(),
        state.session_store.as_ref(),
        state.code_store.as_ref(),
        state.email_client.as_ref(),
        state.token_codec.as_ref(),
        state.clock.as_ref(),
        state.policy,
        &state.app_origin,
    );
    let authenticated = use_case
        .execute(email, password, user_agent(&headers))
        .await?;

    let jar = jar
        .add(access_token_cookie(
            authenticated.access_token,
            state.access_token_ttl,
        ))
        .add(refresh_token_cookie(
            authenticated.refresh_token,
            state.policy.session_ttl,
        ));

    Ok((StatusCode::CREATED, jar, Json(authenticated.user)))
}
