pub mod email_templates;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    AuthenticatedUser, RefreshedTokens,
    get_user::GetUserUseCase,
    login::LoginUseCase,
    logout::LogoutUseCase,
    refresh::RefreshUseCase,
    register::RegisterUseCase,
    request_password_reset::RequestPasswordResetUseCase,
    reset_password::ResetPasswordUseCase,
    sessions::{DeleteSessionUseCase, ListSessionsUseCase},
    verify_email::VerifyEmailUseCase,
};
