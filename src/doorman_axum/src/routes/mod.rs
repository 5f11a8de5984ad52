pub mod forgot_password;
pub mod get_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod sessions;
pub mod verify_email;

pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use get_user::get_user;
pub use login::{LoginRequest, login};
pub use logout::logout;
pub use refresh::refresh;
pub use register::{RegisterRequest, register};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use sessions::{delete_session, list_sessions};
pub use verify_email::verify_email;

use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
