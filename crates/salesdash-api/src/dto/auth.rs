//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use salesdash_auth::UserProfile;

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, message = "Username must be at least 3 characters"),
        custom(function = validate_username_charset)
    )]
    pub username: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = validate_password_complexity)
    )]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub safe_user: UserProfile,
    pub token: String,
}

/// Refresh response (new refresh token travels in the cookie)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Dashboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: salesdash_auth::AuthenticatedUser,
}

fn validate_username_charset(username: &str) -> Result<(), ValidationError> {
    let ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(
            ValidationError::new("username_charset").with_message(std::borrow::Cow::Borrowed(
                "Username may only contain letters, numbers, dots and underscores",
            )),
        )
    }
}

fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(
            ValidationError::new("password_complexity").with_message(std::borrow::Cow::Borrowed(
                "Password must contain an uppercase letter, a lowercase letter, a digit and a special character",
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let req = register("alice.smith_1", "alice@example.com", "Sup3rSecret!");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_short_username_rejected() {
        let req = register("al", "alice@example.com", "Sup3rSecret!");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_username_charset_enforced() {
        let req = register("alice-smith", "alice@example.com", "Sup3rSecret!");
        assert!(req.validate().is_err());

        let req = register("alice smith", "alice@example.com", "Sup3rSecret!");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let req = register("alice", "not-an-email", "Sup3rSecret!");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_weak_passwords_rejected() {
        // Too short
        assert!(register("alice", "a@b.com", "Sh0rt!").validate().is_err());
        // No uppercase
        assert!(register("alice", "a@b.com", "sup3rsecret!")
            .validate()
            .is_err());
        // No digit
        assert!(register("alice", "a@b.com", "SuperSecret!")
            .validate()
            .is_err());
        // No special character
        assert!(register("alice", "a@b.com", "Sup3rSecret")
            .validate()
            .is_err());
    }

    #[test]
    fn test_login_response_uses_camel_case() {
        let response = LoginResponse {
            message: "ok".to_string(),
            safe_user: UserProfile {
                id: uuid::Uuid::new_v4(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                created_at: chrono::Utc::now(),
            },
            token: "jwt".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("safeUser"));
    }
}
