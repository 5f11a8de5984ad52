use chrono::{DateTime, Utc};
use doorman_core::{Email, Password, User, UserId, UserStore, UserStoreError};
use secrecy::{ExposeSecret, Secret};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::password_hash::{compute_password_hash, verify_password_hash};

pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

fn row_to_user(row: PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let verified: bool = row.try_get("verified").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    Ok(User {
        id: UserId::from(id),
        email: Email::try_from(email).map_err(unexpected)?,
        password_hash: Secret::from(password_hash),
        verified,
        created_at,
        updated_at,
    })
}

fn unexpected(e: impl ToString) -> UserStoreError {
    UserStoreError::Unexpected(e.to_string())
}

const USER_COLUMNS: &str = "id, email, password_hash, verified, created_at, updated_at";

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(
        &self,
        email: Email,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO users (id, email, password_hash, verified, created_at, updated_at)
                VALUES ($1, $2, $3, FALSE, $4, $4)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(UserId::new().as_uuid())
        .bind(email.expose())
        .bind(password_hash.expose_secret())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        row_to_user(row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {USER_COLUMNS}
                FROM users
                WHERE email = $1
            "#
        ))
        .bind(email.expose())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(row_to_user).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {USER_COLUMNS}
                FROM users
                WHERE id = $1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(row_to_user).transpose()
    }

    #[tracing::instrument(name = "Validating user credentials", skip_all)]
    async fn compare_password(
        &self,
        user: &User,
        candidate: &Password,
    ) -> Result<bool, UserStoreError> {
        verify_password_hash(user.password_hash.clone(), candidate.clone())
            .await
            .map_err(UserStoreError::Unexpected)
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn set_verified(&self, id: UserId, now: DateTime<Utc>) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET verified = TRUE, updated_at = $2
                WHERE id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        row_to_user(row)
    }

    #[tracing::instrument(name = "Setting new password in PostgreSQL", skip_all)]
    async fn set_password(
        &self,
        id: UserId,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET password_hash = $2, updated_at = $3
                WHERE id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(password_hash.expose_secret())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        row_to_user(row)
    }
}
