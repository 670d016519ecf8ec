//! Access-guard middleware for axum
//!
//! Extracts and verifies a `Bearer` access token. A present-but-invalid
//! token short-circuits with an error response; a missing token lets the
//! request through without user context so public routes keep working,
//! while the [`CurrentUser`] extractor rejects on protected routes.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::error::{AuthError, ErrorResponse};
use crate::token::TokenService;
use crate::types::AuthenticatedUser;

/// Access-guard layer
#[derive(Clone)]
pub struct AuthLayer {
    tokens: Arc<TokenService>,
}

impl AuthLayer {
    /// Create a new access-guard layer
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            tokens: self.tokens.clone(),
        }
    }
}

/// Access-guard middleware service
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    tokens: Arc<TokenService>,
}

impl<S> Service<Request> for AuthMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let tokens = self.tokens.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match bearer_token(req.headers()) {
                Some(token) => match verify_bearer(&token, &tokens) {
                    Ok(user) => {
                        let (mut parts, body) = req.into_parts();
                        parts.extensions.insert(user);
                        let req = Request::from_parts(parts, body);
                        inner.call(req).await
                    }
                    Err(e) => Ok(auth_error_response(e)),
                },
                // No token presented, let the route decide
                None => inner.call(req).await,
            }
        })
    }
}

/// Extract a bearer token from the authorization header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::to_string)
}

/// Verify an access token and build the user context from its claims
fn verify_bearer(token: &str, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let claims = tokens.verify_access(token)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidAccessToken)?;

    Ok(AuthenticatedUser {
        id,
        username: claims.username,
        email: claims.email,
    })
}

/// Build an error response for guard failures
pub fn auth_error_response(error: AuthError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::from(&error);

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap_or_default()))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

// =============================================================================
// Axum Extractors
// =============================================================================

/// Extractor for routes that require authentication
///
/// Rejects when the guard attached no user context.
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| auth_error_response(AuthError::NoAccessToken))
    }
}

/// Extractor for routes where authentication is optional
pub struct OptionalUser(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::types::UserProfile;
    use chrono::Utc;

    fn test_tokens() -> TokenService {
        TokenService::new(JwtConfig {
            access_secret: "access-secret-for-tests-at-least-32-bytes!!".to_string(),
            refresh_secret: "refresh-secret-for-tests-at-least-32-bytes!".to_string(),
            access_token_lifetime: std::time::Duration::from_secs(3600),
            refresh_token_lifetime: std::time::Duration::from_secs(604800),
            issuer: "salesdash-test".to_string(),
        })
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_verify_bearer_builds_user_context() {
        let tokens = test_tokens();
        let user = UserProfile {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
        };
        let token = tokens.mint_access(&user).unwrap();

        let authed = verify_bearer(&token, &tokens).unwrap();
        assert_eq!(authed.id, user.id);
        assert_eq!(authed.username, "alice");
        assert_eq!(authed.email, "alice@example.com");
    }

    #[test]
    fn test_verify_bearer_rejects_garbage() {
        let tokens = test_tokens();
        let result = verify_bearer("not-a-jwt", &tokens);
        assert!(matches!(result, Err(AuthError::InvalidAccessToken)));
    }

    #[test]
    fn test_auth_error_response_status() {
        let response = auth_error_response(AuthError::InvalidAccessToken);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = auth_error_response(AuthError::NoAccessToken);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
