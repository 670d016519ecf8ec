//! Salesdash Authentication Layer
//!
//! Password-based registration and login, short-lived JWT access tokens,
//! long-lived rotating refresh tokens backed by a server-side session
//! registry, and an access-guard middleware for axum.
//!
//! # Architecture
//!
//! - [`PasswordService`] - Argon2id hashing and verification
//! - [`TokenService`] - JWT minting and verification (distinct secrets per kind)
//! - [`CredentialStore`] / [`SessionRegistry`] - persistence contracts
//! - [`AuthService`] - register/login/refresh orchestration
//! - [`middleware`] - tower layer attaching the user context to requests
//!
//! # Token protocol
//!
//! Login issues an access token (1 hour) and a refresh token (7 days) and
//! records the refresh token in the registry under the user's key. Refresh
//! verifies the presented token, then atomically swaps the registry slot
//! for a newly minted one; a swap against a stale token fails, so each
//! refresh token is usable at most once and a newer login invalidates all
//! older refresh tokens.

pub mod config;
pub mod error;
pub mod middleware;
pub mod password;
pub mod store;
pub mod token;
pub mod types;

pub use config::{AuthConfig, JwtConfig, PasswordConfig};
pub use error::{AuthError, AuthResult, ErrorResponse};
pub use middleware::{AuthLayer, AuthMiddleware, CurrentUser, OptionalUser};
pub use password::PasswordService;
pub use store::{CredentialStore, SessionRegistry};
pub use token::TokenService;
pub use types::{
    AccessClaims, AuthenticatedUser, LoginTokens, NewUser, RefreshClaims, RefreshedTokens,
    RegisteredUser, TokenType, UserProfile, UserRecord,
};

use std::sync::Arc;

/// Authentication service orchestrating the credential store, session
/// registry, password hasher, and token issuer
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionRegistry>,
    password: PasswordService,
    tokens: Arc<TokenService>,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionRegistry>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            password: PasswordService::new(config.password.clone()),
            tokens: Arc::new(TokenService::new(config.jwt.clone())),
            config,
        }
    }

    /// The token service, for wiring the access-guard layer
    pub fn tokens(&self) -> Arc<TokenService> {
        self.tokens.clone()
    }

    /// Refresh lifetime, for deriving the cookie max-age
    pub fn refresh_token_lifetime(&self) -> std::time::Duration {
        self.config.jwt.refresh_token_lifetime
    }

    /// Register a new user
    ///
    /// Issues an access token only; no refresh session is started until the
    /// user logs in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<RegisteredUser> {
        // Checked up front for a clean error; the store's unique constraint
        // still catches the race
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = self.password.hash_password(password)?;

        let record = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        let profile = record.profile();
        let access_token = self.tokens.mint_access(&profile)?;

        tracing::info!(user_id = %profile.id, username = %profile.username, "User registered");

        Ok(RegisteredUser {
            user: profile,
            access_token,
        })
    }

    /// Authenticate a user by username and password
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller. On success the registry slot is overwritten, revoking any
    /// refresh token from an earlier login.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<LoginTokens> {
        let record = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        if !self.password.verify_password(password, &record.password_hash)? {
            return Err(AuthError::AuthenticationFailed);
        }

        let profile = record.profile();
        let access_token = self.tokens.mint_access(&profile)?;
        let refresh_token = self.tokens.mint_refresh(profile.id)?;

        self.sessions
            .put(
                profile.id,
                &refresh_token,
                self.config.jwt.refresh_token_lifetime,
            )
            .await?;

        tracing::info!(user_id = %profile.id, username = %profile.username, "User logged in");

        Ok(LoginTokens {
            user: profile,
            access_token,
            refresh_token,
        })
    }

    /// Rotate a refresh token
    ///
    /// Verifies the presented token, reloads the profile so the new access
    /// token carries current claims, then atomically swaps the registry
    /// slot. A stale or superseded token fails the swap.
    pub async fn refresh(&self, presented: &str) -> AuthResult<RefreshedTokens> {
        let claims = self.tokens.verify_refresh(presented)?;
        let user_id = TokenService::subject_id(&claims.sub)?;

        let record = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::SessionMismatch)?;
        let profile = record.profile();

        let access_token = self.tokens.mint_access(&profile)?;
        let refresh_token = self.tokens.mint_refresh(user_id)?;

        let rotated = self
            .sessions
            .rotate(
                user_id,
                presented,
                &refresh_token,
                self.config.jwt.refresh_token_lifetime,
            )
            .await?;

        if !rotated {
            tracing::warn!(user_id = %user_id, "Refresh token rejected: not the registered session");
            return Err(AuthError::SessionMismatch);
        }

        tracing::debug!(user_id = %user_id, "Refresh token rotated");

        Ok(RefreshedTokens {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    // In-memory doubles for the persistence contracts

    #[derive(Default)]
    struct MemoryUsers {
        rows: Mutex<Vec<UserRecord>>,
    }

    #[async_trait]
    impl CredentialStore for MemoryUsers {
        async fn find_by_username(&self, username: &str) -> AuthResult<Option<UserRecord>> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().find(|u| u.username == username).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, user: NewUser) -> AuthResult<UserRecord> {
            let mut rows = self.rows.lock().await;
            if rows.iter().any(|u| u.username == user.username) {
                return Err(AuthError::DuplicateUsername);
            }
            let record = UserRecord {
                id: Uuid::new_v4(),
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            };
            rows.push(record.clone());
            Ok(record)
        }
    }

    #[derive(Default)]
    struct MemorySessions {
        slots: Mutex<HashMap<Uuid, String>>,
    }

    #[async_trait]
    impl SessionRegistry for MemorySessions {
        async fn put(&self, user_id: Uuid, token: &str, _ttl: Duration) -> AuthResult<()> {
            self.slots.lock().await.insert(user_id, token.to_string());
            Ok(())
        }

        async fn get(&self, user_id: Uuid) -> AuthResult<Option<String>> {
            Ok(self.slots.lock().await.get(&user_id).cloned())
        }

        async fn rotate(
            &self,
            user_id: Uuid,
            expected: &str,
            replacement: &str,
            _ttl: Duration,
        ) -> AuthResult<bool> {
            let mut slots = self.slots.lock().await;
            match slots.get(&user_id) {
                Some(current) if current == expected => {
                    slots.insert(user_id, replacement.to_string());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn test_service() -> (AuthService, Arc<MemorySessions>) {
        let mut config = AuthConfig::default();
        config.jwt.access_secret = "access-secret-for-tests-at-least-32-bytes!!".to_string();
        config.jwt.refresh_secret = "refresh-secret-for-tests-at-least-32-bytes!".to_string();
        // Low Argon2 cost so tests stay fast
        config.password.memory_cost = 4096;
        config.password.time_cost = 1;

        let sessions = Arc::new(MemorySessions::default());
        let service = AuthService::new(
            Arc::new(MemoryUsers::default()),
            sessions.clone(),
            config,
        );
        (service, sessions)
    }

    #[tokio::test]
    async fn test_register_login_roundtrip() {
        let (service, _) = test_service();

        let registered = service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();
        assert_eq!(registered.user.username, "alice");
        assert!(!registered.access_token.is_empty());

        let login = service.login("alice", "Sup3rSecret!").await.unwrap();
        assert_eq!(login.user.id, registered.user.id);
        assert!(!login.refresh_token.is_empty());

        // The access token carries the full profile claims
        let claims = service.tokens().verify_access(&login.access_token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let (service, _) = test_service();

        service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();

        let result = service
            .register("alice", "other@example.com", "An0therPass!")
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = test_service();

        service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();

        let unknown = service.login("nobody", "Sup3rSecret!").await;
        let wrong = service.login("alice", "WrongPassword1!").await;

        assert!(matches!(unknown, Err(AuthError::AuthenticationFailed)));
        assert!(matches!(wrong, Err(AuthError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_register_starts_no_session() {
        let (service, sessions) = test_service();

        let registered = service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();

        assert_eq!(sessions.get(registered.user.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_rotation_single_use() {
        let (service, _) = test_service();

        service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();
        let login = service.login("alice", "Sup3rSecret!").await.unwrap();

        let rotated = service.refresh(&login.refresh_token).await.unwrap();
        assert!(!rotated.access_token.is_empty());

        // The consumed token no longer matches the registry slot
        let replay = service.refresh(&login.refresh_token).await;
        assert!(matches!(replay, Err(AuthError::SessionMismatch)));

        // The replacement works
        assert!(service.refresh(&rotated.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_second_login_revokes_earlier_refresh_token() {
        let (service, _) = test_service();

        service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();
        let first = service.login("alice", "Sup3rSecret!").await.unwrap();
        let second = service.login("alice", "Sup3rSecret!").await.unwrap();

        let stale = service.refresh(&first.refresh_token).await;
        assert!(matches!(stale, Err(AuthError::SessionMismatch)));

        assert!(service.refresh(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_with_garbage_token() {
        let (service, _) = test_service();
        let result = service.refresh("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken)));
    }

    #[tokio::test]
    async fn test_refreshed_access_token_carries_profile_claims() {
        let (service, _) = test_service();

        service
            .register("alice", "alice@example.com", "Sup3rSecret!")
            .await
            .unwrap();
        let login = service.login("alice", "Sup3rSecret!").await.unwrap();
        let rotated = service.refresh(&login.refresh_token).await.unwrap();

        let claims = service
            .tokens()
            .verify_access(&rotated.access_token)
            .unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
    }
}
