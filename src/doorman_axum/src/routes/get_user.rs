use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use doorman_application::GetUserUseCase;

use crate::error::ApiError;
use crate::extract::AuthenticatedSession;
use crate::state::AppState;

#[tracing::instrument(name = "Get current user", skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    session: AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = GetUserUseCase::new(state.user_store.as_ref());
    let user = use_case.execute(session.user_id).await?;

    Ok((StatusCode::OK, Json(user)))
}
