//! User repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use salesdash_auth::{AuthError, AuthResult, CredentialStore, NewUser, UserRecord};

use crate::{DbError, DbResult, DbUser};

/// User repository backing the credential store
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("users_username_key") {
                    return DbError::Duplicate(format!("Username {} already exists", username));
                }
            }
            DbError::Query(e)
        })?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl CredentialStore for UserRepo {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<UserRecord>> {
        let user = UserRepo::find_by_username(self, username)
            .await
            .map_err(store_error)?;
        Ok(user.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>> {
        let user = UserRepo::find_by_id(self, id).await.map_err(store_error)?;
        Ok(user.map(Into::into))
    }

    async fn insert(&self, user: NewUser) -> AuthResult<UserRecord> {
        let row = self
            .create(&user.username, &user.email, &user.password_hash)
            .await
            .map_err(|e| match e {
                DbError::Duplicate(_) => AuthError::DuplicateUsername,
                other => store_error(other),
            })?;
        Ok(row.into())
    }
}

fn store_error(e: DbError) -> AuthError {
    tracing::error!(error = %e, "Credential store failure");
    AuthError::Store(e.to_string())
}
