use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use doorman_application::{DeleteSessionUseCase, ListSessionsUseCase};
use doorman_core::{AuthError, SessionId};
use serde_json::json;

use crate::error::ApiError;
use crate::extract::AuthenticatedSession;
use crate::state::AppState;

#[tracing::instrument(name = "List sessions", skip_all)]
pub async fn list_sessions(
    State(state): State<AppState>,
    session: AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ListSessionsUseCase::new(state.session_store.as_ref(), state.clock.as_ref());
    let sessions = use_case
        .execute(session.user_id, session.session_id)
        .await?;

    Ok((StatusCode::OK, Json(sessions)))
}

#[tracing::instrument(name = "Delete session", skip_all)]
pub async fn delete_session(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = id
        .parse()
        .map_err(|_| AuthError::not_found("Session not found"))?;

    let use_case = DeleteSessionUseCase::new(state.session_store.as_ref());
    use_case.execute(session_id, session.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Session removed" })),
    ))
}
