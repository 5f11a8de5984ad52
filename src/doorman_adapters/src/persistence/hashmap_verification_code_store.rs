use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use doorman_core::{
    UserId, VerificationCode, VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
    VerificationCodeStoreError,
};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapVerificationCodeStore {
    codes: Arc<RwLock<HashMap<VerificationCodeId, VerificationCode>>>,
}

impl HashMapVerificationCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for HashMapVerificationCodeStore {
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
        let mut codes = self.codes.write().await;
        codes.insert(code.id, code.clone());
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
        let mut codes = self.codes.write().await;
        codes.remove(&id);
        Ok(())
    }
}
