use chrono::{DateTime, Utc};
use doorman_core::{Session, SessionId, SessionStore, SessionStoreError, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub struct PostgresSessionStore {
    pool: sqlx::PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresSessionStore { pool }
    }
}

fn row_to_session(row: PgRow) -> Result<Session, SessionStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let user_id: Uuid = row.try_get("user_id").map_err(unexpected)?;
    let user_agent: Option<String> = row.try_get("user_agent").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;

    Ok(Session {
        id: SessionId::from(id),
        user_id: UserId::from(user_id),
        user_agent,
        created_at,
        expires_at,
    })
}

fn unexpected(e: impl ToString) -> SessionStoreError {
    SessionStoreError::Unexpected(e.to_string())
}

const SESSION_COLUMNS: &str = "id, user_id, user_agent, created_at, expires_at";

#[async_trait::async_trait]
impl SessionStore for PostgresSessionStore {
    #[tracing::instrument(name = "Adding session to PostgreSQL", skip_all)]
    async fn create(
        &self,
        user_id: UserId,
        user_agent: Option<String>,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, SessionStoreError> {
        let row = sqlx::query(&format!(
            r#"
                INSERT INTO sessions (id, user_id, user_agent, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(SessionId::new().as_uuid())
        .bind(user_id.as_uuid())
        .bind(user_agent)
        .bind(now)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        row_to_session(row)
    }

    #[tracing::instrument(name = "Retrieving session from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {SESSION_COLUMNS}
                FROM sessions
                WHERE id = $1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(row_to_session).transpose()
    }

    #[tracing::instrument(name = "Listing active sessions from PostgreSQL", skip_all)]
    async fn find_active_by_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionStoreError> {
        let rows = sqlx::query(&format!(
            r#"
                SELECT {SESSION_COLUMNS}
                FROM sessions
                WHERE user_id = $1 AND expires_at > $2
                ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter().map(row_to_session).collect()
    }

    #[tracing::instrument(name = "Extending session expiry in PostgreSQL", skip_all)]
    async fn extend_expiry(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE sessions
                SET expires_at = $2
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(SessionStoreError::SessionNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting session from PostgreSQL", skip_all)]
    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        sqlx::query(
            r#"
                DELETE FROM sessions
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Deleting owned session from PostgreSQL", skip_all)]
    async fn delete_owned(
        &self,
        id: SessionId,
        user_id: UserId,
    ) -> Result<(), SessionStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM sessions
                WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(SessionStoreError::SessionNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting all user sessions from PostgreSQL", skip_all)]
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM sessions
                WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(result.rows_affected())
    }
}
