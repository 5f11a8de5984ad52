use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use doorman_application::VerifyEmailUseCase;
use doorman_core::{AuthError, VerificationCodeId};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // A malformed id is indistinguishable from an unknown one.
    let code_id: VerificationCodeId = code
        .parse()
        .map_err(|_| AuthError::not_found("Invalid or expired verification code"))?;

    let use_case = VerifyEmailUseCase::new(
        state.user_store.as_ref(),
        state.code_store.as_ref(),
        state.clock.as_ref(),
    );
    use_case.execute(code_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Email was successfully verified" })),
    ))
}
