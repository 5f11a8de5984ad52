use chrono::{DateTime, Utc};
use doorman_core::{
    UserId, VerificationCode, VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
    VerificationCodeStoreError,
};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub struct PostgresVerificationCodeStore {
    pool: sqlx::PgPool,
}

impl PostgresVerificationCodeStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresVerificationCodeStore { pool }
    }
}

fn row_to_code(row: PgRow) -> Result<VerificationCode, VerificationCodeStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let user_id: Uuid = row.try_get("user_id").map_err(unexpected)?;
    let kind: String = row.try_get("kind").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;

    Ok(VerificationCode {
        id: VerificationCodeId::from(id),
        user_id: UserId::from(user_id),
        kind: kind.parse().map_err(VerificationCodeStoreError::Unexpected)?,
        created_at,
        expires_at,
    })
}

fn unexpected(e: impl ToString) -> VerificationCodeStoreError {
    VerificationCodeStoreError::Unexpected(e.to_string())
}

const CODE_COLUMNS: &str = "id, user_id, kind, created_at, expires_at";

#[async_trait::async_trait]
impl VerificationCodeStore for PostgresVerificationCodeStore {
    #[tracing::instrument(name = "Adding verification code to PostgreSQL", skip_all)]
    async fn create(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, VerificationCodeStoreError> {
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO verification_codes (id, user_id, kind, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {CODE_COLUMNS}
            "#
        ))
        .bind(VerificationCodeId::new().as_uuid())
        .bind(user_id.as_uuid())
        .bind(kind.as_str())
        .bind(now)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        row_to_code(row)
    }

    #[tracing::instrument(name = "Retrieving valid verification code from PostgreSQL", skip_all)]
    async fn find_valid(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {CODE_COLUMNS}
                FROM verification_codes
                WHERE id = $1 AND kind = $2 AND expires_at > $3
            "#
        ))
        .bind(id.as_uuid())
        .bind(kind.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(row_to_code).transpose()
    }

    #[tracing::instrument(name = "Counting recent verification codes in PostgreSQL", skip_all)]
    async fn count_recent_for_user(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError> {
        let row = sqlx::query(
            r#"
                SELECT COUNT(*) AS count
                FROM verification_codes
                WHERE user_id = $1 AND kind = $2 AND created_at > $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(kind.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        let count: i64 = row.try_get("count").map_err(unexpected)?;
        Ok(count as u64)
    }

    #[tracing::instrument(name = "Consuming verification code in PostgreSQL", skip_all)]
    async fn consume(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError> {
        sqlx::query(
            r#"
                DELETE FROM verification_codes
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }
}
