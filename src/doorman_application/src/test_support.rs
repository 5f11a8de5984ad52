//! Shared in-memory collaborators for the use-case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use doorman_core::{
    AccessTokenClaims, Clock, Email, EmailClient, EmailClientError, EmailId, EmailMessage,
    Password, RefreshTokenClaims, Session, SessionId, SessionStore, SessionStoreError,
    TokenCodec, TokenError, User, UserId, UserStore, UserStoreError, VerificationCode,
    VerificationCodeId, VerificationCodeKind, VerificationCodeStore, VerificationCodeStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(address: &str) -> Email {
    Email::try_from(address.to_string()).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(raw.to_string()).unwrap()
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn fake_hash(password: &Password) -> Secret<String> {
    Secret::from(format!("fakehash:{}", password.as_ref().expose_secret()))
}

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(
        &self,
        email: Email,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = User {
            id: UserId::new(),
            email,
            password_hash: fake_hash(&password),
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
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn compare_password(
        &self,
        user: &User,
        candidate: &Password,
    ) -> Result<bool, UserStoreError> {
        Ok(user.password_hash.expose_secret() == fake_hash(candidate).expose_secret())
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
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.password_hash = fake_hash(&new_password);
        user.updated_at = now;
        Ok(user.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
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
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
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
        let session = sessions.get_mut(&id).ok_or(SessionStoreError::SessionNotFound)?;
        session.expires_at = expires_at;
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&id);
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

#[derive(Clone, Default)]
pub struct InMemoryCodeStore {
    codes: Arc<RwLock<HashMap<VerificationCodeId, VerificationCode>>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.codes.read().await.len()
    }

    pub async fn first_of_kind(&self, kind: VerificationCodeKind) -> Option<VerificationCode> {
        let codes = self.codes.read().await;
        codes.values().find(|code| code.kind == kind).cloned()
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryCodeStore {
    async fn create(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, VerificationCodeStoreError> {
        let code = VerificationCode {
            id: VerificationCodeId::new(),
            user_id,
            kind,
            created_at: now,
            expires_at,
        };
        self.codes.write().await.insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_valid(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        Ok(codes
            .get(&id)
            .filter(|code| code.kind == kind && code.expires_at > now)
            .cloned())
    }

    async fn count_recent_for_user(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .filter(|code| {
                code.user_id == user_id && code.kind == kind && code.created_at > since
            })
            .count() as u64)
    }

    async fn consume(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError> {
        self.codes.write().await.remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail_sends: Arc<AtomicBool>,
    blank_message_ids: Arc<AtomicBool>,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with a transport error.
    pub fn failing() -> Self {
        let client = Self::default();
        client.fail_sends.store(true, Ordering::SeqCst);
        client
    }

    /// Sends succeed but the provider response carries no message id.
    pub fn with_blank_message_ids() -> Self {
        let client = Self::default();
        client.blank_message_ids.store(true, Ordering::SeqCst);
        client
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send(&self, message: EmailMessage) -> Result<EmailId, EmailClientError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(EmailClientError::Transport("connection refused".to_string()));
        }
        self.sent.write().await.push(message);
        if self.blank_message_ids.load(Ordering::SeqCst) {
            Ok(EmailId(String::new()))
        } else {
            Ok(EmailId("msg_1".to_string()))
        }
    }
}

/// Transparent token codec: claims are encoded as plain strings so
/// tests can decode them without a signing key.
#[derive(Clone, Copy, Default)]
pub struct FakeTokenCodec;

impl TokenCodec for FakeTokenCodec {
    fn sign_access(&self, claims: &AccessTokenClaims) -> Result<String, TokenError> {
        Ok(format!("access.{}.{}", claims.session_id, claims.user_id))
    }

    fn sign_refresh(&self, claims: &RefreshTokenClaims) -> Result<String, TokenError> {
        Ok(format!("refresh.{}", claims.session_id))
    }

    fn verify_access(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("access"), Some(session), Some(user), None) => Ok(AccessTokenClaims {
                session_id: session.parse().map_err(|_| TokenError::Invalid)?,
                user_id: user.parse().map_err(|_| TokenError::Invalid)?,
            }),
            _ => Err(TokenError::Invalid),
        }
    }

    fn verify_refresh(&self, token: &str) -> Result<RefreshTokenClaims, TokenError> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("refresh"), Some(session), None) => Ok(RefreshTokenClaims {
                session_id: session.parse().map_err(|_| TokenError::Invalid)?,
            }),
            _ => Err(TokenError::Invalid),
        }
    }
}

#[derive(Clone)]
pub struct FixedClock {
    now: Arc<std::sync::RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(std::sync::RwLock::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}
