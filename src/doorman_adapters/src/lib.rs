pub mod config;
pub mod email;
pub mod persistence;
pub mod tokens;

pub use config::settings::{
    AppSettings, AuthSettings, DatabaseSettings, EmailSettings, Settings,
};
pub use email::mock_email_client::MockEmailClient;
pub use email::resend_email_client::ResendEmailClient;
pub use persistence::hashmap_session_store::HashMapSessionStore;
pub use persistence::hashmap_user_store::HashMapUserStore;
pub use persistence::hashmap_verification_code_store::HashMapVerificationCodeStore;
pub use persistence::postgres_session_store::PostgresSessionStore;
pub use persistence::postgres_user_store::PostgresUserStore;
pub use persistence::postgres_verification_code_store::PostgresVerificationCodeStore;
pub use tokens::jwt_codec::{JwtTokenCodec, TokenConfig};
