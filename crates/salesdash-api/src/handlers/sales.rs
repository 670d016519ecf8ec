//! Sales data handlers (read-only)

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use salesdash_db::DbSale;

use crate::error::ApiResult;
use crate::state::AppState;

/// All sale rows
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DbSale>>> {
    let rows = state.db.sales_repo().list().await?;
    Ok(Json(rows))
}

/// Sale IDs
pub async fn ids(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Uuid>>> {
    let ids = state.db.sales_repo().ids().await?;
    Ok(Json(ids))
}

/// Selling business IDs
pub async fn business_ids(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Uuid>>> {
    let ids = state.db.sales_repo().business_ids().await?;
    Ok(Json(ids))
}

/// Order numbers
pub async fn order_numbers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let values = state.db.sales_repo().order_numbers().await?;
    Ok(Json(values))
}

/// Customer names
pub async fn customer_names(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let values = state.db.sales_repo().customer_names().await?;
    Ok(Json(values))
}

/// Product names
pub async fn product_names(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let values = state.db.sales_repo().product_names().await?;
    Ok(Json(values))
}

/// Sale prices
pub async fn sale_prices(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Decimal>>> {
    let values = state.db.sales_repo().sale_prices().await?;
    Ok(Json(values))
}
