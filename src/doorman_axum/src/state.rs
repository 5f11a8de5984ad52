use std::sync::Arc;

use doorman_core::{
    AuthPolicy, Clock, EmailClient, SessionStore, TokenCodec, UserStore, VerificationCodeStore,
};

/// Shared handler state. Ports are trait objects so the same router
/// serves Postgres in production and the in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub session_store: Arc<dyn SessionStore>,
    pub code_store: Arc<dyn VerificationCodeStore>,
    pub email_client: Arc<dyn EmailClient>,
    pub token_codec: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
    pub policy: AuthPolicy,
    /// Max-age of the access token cookie; mirrors the codec's access
    /// token TTL.
    pub access_token_ttl: chrono::Duration,
    /// Origin used in emailed links.
    pub app_origin: String,
}
