use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use doorman_core::{Session, SessionId, SessionStore, SessionStoreError, UserId};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl HashMapSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn create(
        &self,
        user_id: UserId,
        user_agent: Option<String>,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, SessionStoreError> {
        let session = Session {
            id: SessionId::new(),
            user_id,
            user_agent,
            created_at: now,
            expires_at,
        };
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        let mut active: Vec<Session> = sessions
            .values()
            .filter(|session| session.user_id == user_id && session.expires_at > now)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn extend_expiry(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionStoreError::SessionNotFound)?;
        session.expires_at = expires_at;
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id);
        Ok(())
    }

    async fn delete_owned(
        &self,
        id: SessionId,
        user_id: UserId,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(session) if session.user_id == user_id => {
                sessions.remove(&id);
                Ok(())
            }
            _ => Err(SessionStoreError::SessionNotFound),
        }
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}
