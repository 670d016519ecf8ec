//! Authentication handlers
//!
//! Registration, login, and refresh. The refresh token travels only in an
//! HTTP-only cookie; access tokens travel in the JSON body.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use salesdash_auth::AuthError;

use crate::dto::{
    LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, RegisterResponse,
};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

const REFRESH_COOKIE: &str = "refreshToken";

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let registered = state
        .auth
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: registered.user,
            token: registered.access_token,
        }),
    ))
}

/// Log in and start a refresh session
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let tokens = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    let jar = jar.add(refresh_cookie(
        tokens.refresh_token,
        state.auth.refresh_token_lifetime(),
        state.secure_cookies,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            safe_user: tokens.user,
            token: tokens.access_token,
        }),
    ))
}

/// Rotate the refresh session and mint a new access token
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<RefreshResponse>)> {
    let presented = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AuthError::MissingRefreshToken)?;

    let rotated = state.auth.refresh(&presented).await?;

    let jar = jar.add(refresh_cookie(
        rotated.refresh_token,
        state.auth.refresh_token_lifetime(),
        state.secure_cookies,
    ));

    Ok((
        jar,
        Json(RefreshResponse {
            token: rotated.access_token,
        }),
    ))
}

/// Build the refresh cookie; max-age matches the token and registry TTL
fn refresh_cookie(token: String, lifetime: std::time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(secure)
        .max_age(time::Duration::seconds(lifetime.as_secs() as i64))
        .build()
}
