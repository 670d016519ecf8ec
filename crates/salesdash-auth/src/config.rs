//! Authentication configuration
//!
//! Centralized configuration for all authentication components with
//! secure defaults following OWASP recommendations.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Password hashing configuration
    pub password: PasswordConfig,
}

/// JWT token configuration
///
/// Access and refresh tokens are signed with distinct secrets so that a leak
/// of one cannot forge the other. The refresh lifetime is the single
/// authoritative duration: token expiry, session-registry TTL, and the
/// refresh cookie max-age all derive from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing access tokens (at least 256 bits)
    pub access_secret: String,
    /// Secret key for signing refresh tokens (at least 256 bits)
    pub refresh_secret: String,
    /// Access token lifetime
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,
    /// Refresh token lifetime
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,
    /// Token issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),  // Must be set in production
            refresh_secret: String::new(), // Must be set in production
            access_token_lifetime: Duration::from_secs(60 * 60), // 1 hour
            refresh_token_lifetime: Duration::from_secs(7 * 24 * 60 * 60), // 7 days
            issuer: "salesdash".to_string(),
        }
    }
}

/// Password hashing configuration (Argon2id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB (OWASP recommends 19456 KiB = 19 MiB minimum)
    pub memory_cost: u32,
    /// Time cost (iterations) - OWASP recommends 2 minimum
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
    /// Output hash length in bytes
    pub hash_length: u32,
    /// Pepper (additional secret, optional)
    pub pepper: Option<String>,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            // OWASP recommended values for Argon2id
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
            pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.jwt.access_secret = secret;
        }
        if let Ok(secret) = std::env::var("REFRESH_TOKEN_SECRET") {
            config.jwt.refresh_secret = secret;
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.jwt.issuer = issuer;
        }
        if let Ok(pepper) = std::env::var("PASSWORD_PEPPER") {
            config.password.pepper = Some(pepper);
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.jwt.access_secret.is_empty() {
            errors.push("Access token secret must be set".to_string());
        } else if self.jwt.access_secret.len() < 32 {
            errors.push("Access token secret should be at least 256 bits (32 bytes)".to_string());
        }

        if self.jwt.refresh_secret.is_empty() {
            errors.push("Refresh token secret must be set".to_string());
        } else if self.jwt.refresh_secret.len() < 32 {
            errors.push("Refresh token secret should be at least 256 bits (32 bytes)".to_string());
        }

        if !self.jwt.access_secret.is_empty() && self.jwt.access_secret == self.jwt.refresh_secret {
            errors.push("Access and refresh token secrets must differ".to_string());
        }

        if self.password.memory_cost < 19456 {
            errors.push(
                "Argon2 memory cost should be at least 19456 KiB (OWASP recommendation)"
                    .to_string(),
            );
        }
        if self.password.time_cost < 2 {
            errors.push("Argon2 time cost should be at least 2 (OWASP recommendation)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
