//! Business data handlers (read-only)

use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

use salesdash_db::DbBusiness;

use crate::error::ApiResult;
use crate::state::AppState;

/// All business rows
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DbBusiness>>> {
    let rows = state.db.business_repo().list().await?;
    Ok(Json(rows))
}

/// Business IDs
pub async fn ids(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Uuid>>> {
    let ids = state.db.business_repo().ids().await?;
    Ok(Json(ids))
}

/// Owning user IDs
pub async fn user_ids(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Uuid>>> {
    let ids = state.db.business_repo().user_ids().await?;
    Ok(Json(ids))
}

/// Business names
pub async fn names(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let names = state.db.business_repo().names().await?;
    Ok(Json(names))
}
