use secrecy::Secret;
use serde::Deserialize;

use super::constants;
use crate::tokens::jwt_codec::TokenConfig;

/// Runtime configuration, layered from defaults and `DOORMAN__`-prefixed
/// environment variables. Secrets have no defaults; a missing one fails
/// the load instead of starting with a guessable key.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    /// Origin used in emailed links and allowed by CORS.
    pub origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_token_secret: Secret<String>,
    pub refresh_token_secret: Secret<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
}

impl AuthSettings {
    pub fn access_token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.access_token_secret.clone(),
            ttl: chrono::Duration::seconds(self.access_token_ttl_seconds),
        }
    }

    pub fn refresh_token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.refresh_token_secret.clone(),
            ttl: chrono::Duration::seconds(self.refresh_token_ttl_seconds),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub base_url: String,
    pub sender: String,
    pub api_key: Secret<String>,
    pub timeout_ms: u64,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("app.address", constants::prod::APP_ADDRESS)?
            .set_default("app.origin", constants::prod::APP_ORIGIN)?
            .set_default("email.base_url", constants::prod::email_client::BASE_URL)?
            .set_default("email.sender", constants::prod::email_client::SENDER)?
            .set_default(
                "email.timeout_ms",
                constants::prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .set_default(
                "auth.access_token_ttl_seconds",
                constants::prod::tokens::ACCESS_TTL_SECONDS,
            )?
            .set_default(
                "auth.refresh_token_ttl_seconds",
                constants::prod::tokens::REFRESH_TTL_SECONDS,
            )?
            .add_source(
                config::Environment::with_prefix(constants::env::ENV_PREFIX)
                    .separator(constants::env::ENV_SEPARATOR),
            )
            .build()?
            .try_deserialize()
    }
}
