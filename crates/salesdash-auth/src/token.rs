//! JWT token service
//!
//! Two independent HS256 key pairs: one for short-lived access tokens, one
//! for long-lived refresh tokens. A leaked access secret cannot forge
//! refresh tokens and vice versa.
//!
//! Verification failures of any kind (bad signature, expired, wrong issuer,
//! wrong token type) collapse into a single per-kind error so callers never
//! learn which check failed.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AuthError, AuthResult};
use crate::types::{AccessClaims, RefreshClaims, TokenType, UserProfile};

/// JWT service for minting and verifying both token kinds
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service from config
    pub fn new(config: JwtConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        Self {
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
        }
    }

    /// Mint an access token carrying the user's profile claims
    pub fn mint_access(&self, user: &UserProfile) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(self.config.access_token_lifetime)
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        let claims = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            token_type: TokenType::Access,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode access token: {}", e)))
    }

    /// Mint a refresh token carrying only the user ID
    pub fn mint_refresh(&self, user_id: Uuid) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(self.config.refresh_token_lifetime)
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            token_type: TokenType::Refresh,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode refresh token: {}", e)))
    }

    /// Verify an access token and return its claims
    pub fn verify_access(&self, token: &str) -> AuthResult<AccessClaims> {
        let claims = decode::<AccessClaims>(
            token,
            &self.access_decoding_key,
            &self.validation(),
        )
        .map_err(|_| AuthError::InvalidAccessToken)?
        .claims;

        if claims.token_type != TokenType::Access {
            return Err(AuthError::InvalidAccessToken);
        }

        Ok(claims)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh(&self, token: &str) -> AuthResult<RefreshClaims> {
        let claims = decode::<RefreshClaims>(
            token,
            &self.refresh_decoding_key,
            &self.validation(),
        )
        .map_err(|_| AuthError::InvalidRefreshToken)?
        .claims;

        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(claims)
    }

    /// Parse the subject claim into a user ID
    pub fn subject_id(sub: &str) -> AuthResult<Uuid> {
        Uuid::parse_str(sub).map_err(|_| AuthError::InvalidRefreshToken)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = true;
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-for-tests-at-least-32-bytes!!".to_string(),
            refresh_secret: "refresh-secret-for-tests-at-least-32-bytes!".to_string(),
            access_token_lifetime: std::time::Duration::from_secs(3600),
            refresh_token_lifetime: std::time::Duration::from_secs(604800),
            issuer: "salesdash-test".to_string(),
        }
    }

    fn test_user() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = TokenService::new(test_config());
        let user = test_user();

        let token = service.mint_access(&user).unwrap();
        let claims = service.verify_access(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.iss, "salesdash-test");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let service = TokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.mint_refresh(user_id).unwrap();
        let claims = service.verify_refresh(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = TokenService::new(test_config());
        let token = service.mint_access(&test_user()).unwrap();

        // Different secret, so the signature check alone rejects it
        let result = service.verify_refresh(&token);
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken)));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = TokenService::new(test_config());
        let token = service.mint_refresh(Uuid::new_v4()).unwrap();

        let result = service.verify_access(&token);
        assert!(matches!(result, Err(AuthError::InvalidAccessToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = TokenService::new(test_config());
        let token = service.mint_access(&test_user()).unwrap();

        let mut other_config = test_config();
        other_config.access_secret = "a-completely-different-32-byte-secret!!!".to_string();
        let other = TokenService::new(other_config);

        assert!(matches!(
            other.verify_access(&token),
            Err(AuthError::InvalidAccessToken)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = TokenService::new(test_config());
        let token = service.mint_access(&test_user()).unwrap();

        let mut other_config = test_config();
        other_config.issuer = "someone-else".to_string();
        let other = TokenService::new(other_config);

        assert!(matches!(
            other.verify_access(&token),
            Err(AuthError::InvalidAccessToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let service = TokenService::new(config.clone());
        let user = test_user();

        // Hand-encode claims already in the past
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            token_type: TokenType::Access,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            iss: config.issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify_access(&token),
            Err(AuthError::InvalidAccessToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(test_config());
        assert!(matches!(
            service.verify_access("not-a-jwt"),
            Err(AuthError::InvalidAccessToken)
        ));
        assert!(matches!(
            service.verify_refresh("not-a-jwt"),
            Err(AuthError::InvalidRefreshToken)
        ));
    }
}
