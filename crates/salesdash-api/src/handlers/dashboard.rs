//! Dashboard handler

use axum::Json;

use crate::dto::DashboardResponse;
use crate::error::ApiResult;
use crate::extractors::CurrentUser;

/// Protected dashboard endpoint
pub async fn dashboard(CurrentUser(user): CurrentUser) -> ApiResult<Json<DashboardResponse>> {
    Ok(Json(DashboardResponse {
        message: format!("Welcome to your dashboard, {}!", user.username),
        user,
    }))
}
