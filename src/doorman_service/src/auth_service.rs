use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use doorman_adapters::DatabaseSettings;
use doorman_axum::AppState;
use doorman_axum::routes::{
    delete_session, forgot_password, get_user, list_sessions, login, logout, refresh, register,
    reset_password, verify_email,
};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The assembled authentication service: every route from the
/// register/login/refresh core to the session management endpoints,
/// wired to one [`AppState`].
pub struct AuthService {
    router: Router,
}

impl AuthService {
    pub fn new(state: AppState) -> Self {
        let router = Router::new()
            .route("/", get(health))
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route("/auth/logout", get(logout))
            .route("/auth/refresh", get(refresh))
            .route("/auth/email/verify/{code}", get(verify_email))
            .route("/auth/password/forgot", post(forgot_password))
            .route("/auth/password/reset", post(reset_password))
            .route("/user", get(get_user))
            .route("/sessions", get(list_sessions))
            .route("/sessions/{id}", delete(delete_session))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricted to one browser origin.
    /// Credentialed CORS forbids a wildcard, so the origin is exact.
    pub fn as_router(mut self, allowed_origin: Option<HeaderValue>) -> Router {
        if let Some(allowed_origin) = allowed_origin {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(allowed_origin);

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origin: Option<HeaderValue>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_router(allowed_origin);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}

/// Connects the pool and brings the schema up to date.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}
