use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use doorman_application::LoginUseCase;
use doorman_core::{Email, Password};
use secrecy::Secret;
use serde::Deserialize;

use super::user_agent;
use crate::cookies::{access_token_cookie, refresh_token_cookie};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(
        state.user_store.as_ref(),
        state.session_store.as_ref(),
        state.token_codec.as_ref(),
        state.clock.as_ref(),
        state.policy,
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

    Ok((StatusCode::OK, jar, Json(authenticated.user)))
}
