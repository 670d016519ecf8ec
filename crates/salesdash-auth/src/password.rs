//! Password hashing
//!
//! Argon2id with per-call random salts and an optional pepper. Strength
//! rules live in the request DTO validation; this service only hashes and
//! verifies.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};
use zeroize::Zeroizing;

use crate::config::PasswordConfig;
use crate::error::{AuthError, AuthResult};

/// Password service for hashing and verification
#[derive(Clone)]
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    /// Create a new password service
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Hash a password using Argon2id, producing a PHC string
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = self.apply_pepper(password);

        let salt = SaltString::generate(&mut OsRng);

        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC hash
    ///
    /// Constant-time via the argon2 verifier. A malformed stored hash is a
    /// hashing error, not a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let peppered = self.apply_pepper(password);

        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashingFailed)?;

        let argon2 = Argon2::default();
        match argon2.verify_password(peppered.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordHashingFailed),
        }
    }

    fn apply_pepper(&self, password: &str) -> Zeroizing<String> {
        match self.config.pepper {
            Some(ref pepper) => Zeroizing::new(format!("{}{}", password, pepper)),
            None => Zeroizing::new(password.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PasswordConfig {
        PasswordConfig {
            // Low cost so tests stay fast
            memory_cost: 4096,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
            pepper: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new(test_config());
        let password = "MySecureP@ss123";

        let hash = service.hash_password(password).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(service.verify_password(password, &hash).unwrap());
        assert!(!service.verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_hash_with_pepper() {
        let mut config = test_config();
        config.pepper = Some("secret-pepper".to_string());
        let service = PasswordService::new(config);

        let password = "MySecureP@ss123";
        let hash = service.hash_password(password).unwrap();

        assert!(service.verify_password(password, &hash).unwrap());

        // A service without the pepper sees a different effective password
        let service_no_pepper = PasswordService::new(test_config());
        assert!(!service_no_pepper.verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_different_salts_different_hashes() {
        let service = PasswordService::new(test_config());
        let password = "MySecureP@ss123";

        let hash1 = service.hash_password(password).unwrap();
        let hash2 = service.hash_password(password).unwrap();

        assert_ne!(hash1, hash2);
        assert!(service.verify_password(password, &hash1).unwrap());
        assert!(service.verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = PasswordService::new(test_config());
        let result = service.verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::PasswordHashingFailed)));
    }
}
