//! Credential store: users, password digests and current refresh tokens

use super::{classify_write_error, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub password_digest: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistent mapping of user id to digest and current refresh token
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find a user by id
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a user with no refresh token.
    ///
    /// Returns [`StoreError::Duplicate`] if the id is taken.
    async fn create_user(&self, id: &str, password_digest: &str)
        -> Result<UserRecord, StoreError>;

    /// Find the user whose stored refresh token equals `token` exactly
    async fn find_user_by_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Overwrite (or clear, with `None`) the stored refresh token
    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), StoreError>;
}

/// Postgres-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgUserRepository {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, password_digest, refresh_token, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(
        &self,
        id: &str,
        password_digest: &str,
    ) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, password_digest)
            VALUES ($1, $2)
            RETURNING id, password_digest, refresh_token, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, id))
    }

    async fn find_user_by_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, password_digest, refresh_token, created_at, updated_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
