pub mod get_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod sessions;
pub mod verify_email;

use doorman_core::UserView;

/// Result of a successful register or login: the public account view
/// plus a freshly signed token pair scoped to the new session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a refresh. The refresh token is only rotated when the
/// session was close enough to expiry to be extended.
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub new_refresh_token: Option<String>,
}
