use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use doorman_application::RequestPasswordResetUseCase;
use doorman_core::Email;
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

/// Always answers 200 for a well-formed email, whether or not an
/// account exists. Only the rate limit is allowed to show through.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;

    let use_case = RequestPasswordResetUseCase::new(
        state.user_store.as_ref(),
        state.code_store.as_ref(),
        state.email_client.as_ref(),
        state.clock.as_ref(),
        state.policy,
        &state.app_origin,
    );
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password reset email sent" })),
    ))
}
