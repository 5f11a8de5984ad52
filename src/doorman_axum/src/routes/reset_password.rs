use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use doorman_application::ResetPasswordUseCase;
use doorman_core::{AuthError, Password, VerificationCodeId};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use crate::cookies::{access_removal_cookie, refresh_removal_cookie};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
    #[serde(rename = "verificationCode")]
    pub verification_code: String,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let code_id: VerificationCodeId = request
        .verification_code
        .parse()
        .map_err(|_| AuthError::not_found("Invalid or expired verification code"))?;
    let password = Password::try_from(request.password)?;

    let use_case = ResetPasswordUseCase::new(
        state.user_store.as_ref(),
        state.session_store.as_ref(),
        state.code_store.as_ref(),
        state.clock.as_ref(),
    );
    use_case.execute(code_id, password).await?;

    // Every session just died, including this client's.
    let jar = jar.add(access_removal_cookie()).add(refresh_removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Password was reset successfully" })),
    ))
}
