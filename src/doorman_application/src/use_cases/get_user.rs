use doorman_core::{AuthError, UserId, UserStore, UserView};

/// Get-user use case - the authenticated caller's own public view.
pub struct GetUserUseCase<'a> {
    user_store: &'a dyn UserStore,
}

impl<'a> GetUserUseCase<'a> {
    pub fn new(user_store: &'a dyn UserStore) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip_all)]
    pub async fn execute(&self, user_id: UserId) -> Result<UserView, AuthError> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::not_found("User not found"))?;
        Ok(user.omit_password())
    }
}
