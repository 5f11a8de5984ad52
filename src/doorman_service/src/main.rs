use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use color_eyre::eyre::Result;
use doorman_adapters::{
    JwtTokenCodec, PostgresSessionStore, PostgresUserStore, PostgresVerificationCodeStore,
    ResendEmailClient, Settings,
};
use doorman_axum::AppState;
use doorman_core::{AuthPolicy, SystemClock};
use doorman_service::{AuthService, configure_postgresql};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings.database).await?;

    let user_store = PostgresUserStore::new(pg_pool.clone());
    let session_store = PostgresSessionStore::new(pg_pool.clone());
    let code_store = PostgresVerificationCodeStore::new(pg_pool);

    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email.timeout_ms))
        .build()?;
    let email_client = ResendEmailClient::new(
        settings.email.base_url.clone(),
        settings.email.sender.clone(),
        settings.email.api_key.clone(),
        http_client,
    );

    let token_codec = JwtTokenCodec::new(
        settings.auth.access_token_config(),
        settings.auth.refresh_token_config(),
    );

    let state = AppState {
        user_store: Arc::new(user_store),
        session_store: Arc::new(session_store),
        code_store: Arc::new(code_store),
        email_client: Arc::new(email_client),
        token_codec: Arc::new(token_codec),
        clock: Arc::new(SystemClock),
        policy: AuthPolicy::default(),
        access_token_ttl: chrono::Duration::seconds(settings.auth.access_token_ttl_seconds),
        app_origin: settings.app.origin.clone(),
    };

    let allowed_origin = HeaderValue::from_str(&settings.app.origin)?;

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting doorman auth service...");

    AuthService::new(state)
        .run_standalone(listener, Some(allowed_origin))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
