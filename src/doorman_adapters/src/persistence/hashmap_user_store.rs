use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use doorman_core::{Email, Password, User, UserId, UserStore, UserStoreError};
use tokio::sync::RwLock;

use super::password_hash::{compute_password_hash, verify_password_hash};

/// In-memory credential store. Hashes with the same argon2 parameters
/// as the Postgres store so login behaves identically in both.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn create_user(
        &self,
        email: Email,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            verified: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn compare_password(
        &self,
        user: &User,
        candidate: &Password,
    ) -> Result<bool, UserStoreError> {
        verify_password_hash(user.password_hash.clone(), candidate.clone())
            .await
            .map_err(UserStoreError::Unexpected)
    }

    async fn set_verified(&self, id: UserId, now: DateTime<Utc>) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.verified = true;
        user.updated_at = now;
        Ok(user.clone())
    }

    async fn set_password(
        &self,
        id: UserId,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.password_hash = password_hash;
        user.updated_at = now;
        Ok(user.clone())
    }
}
