//! Persistence contracts
//!
//! The auth service is written against these traits so the database crate
//! can supply PostgreSQL and Redis implementations while unit tests run
//! against in-memory doubles.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::error::AuthResult;
use crate::types::{NewUser, UserRecord};

/// Credential storage contract
///
/// Implementations must enforce username uniqueness and surface a
/// violation as [`AuthError::DuplicateUsername`](crate::AuthError).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<UserRecord>>;

    /// Look up a user by ID
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>>;

    /// Insert a new user and return the stored record
    async fn insert(&self, user: NewUser) -> AuthResult<UserRecord>;
}

/// Refresh-session registry contract
///
/// One slot per user. The stored value is the currently valid refresh
/// token; absence means no active session.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Store a refresh token for a user, overwriting any existing slot
    async fn put(&self, user_id: Uuid, token: &str, ttl: Duration) -> AuthResult<()>;

    /// Fetch the currently registered refresh token, if any
    async fn get(&self, user_id: Uuid) -> AuthResult<Option<String>>;

    /// Atomically replace `expected` with `replacement` and reset the TTL
    ///
    /// Returns `false` when the slot is absent or holds a different value.
    /// Under concurrent rotations with the same stale token, at most one
    /// caller observes `true`.
    async fn rotate(
        &self,
        user_id: Uuid,
        expected: &str,
        replacement: &str,
        ttl: Duration,
    ) -> AuthResult<bool>;
}
