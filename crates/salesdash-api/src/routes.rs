//! API routes

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// All application routes, mounted at the root
pub fn app_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .nest("/business", business_routes())
        .nest("/sales", sales_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
}

/// Business data routes (public, read-only)
fn business_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::business::list))
        .route("/ids", get(handlers::business::ids))
        .route("/user-ids", get(handlers::business::user_ids))
        .route("/names", get(handlers::business::names))
}

/// Sales data routes (public, read-only)
fn sales_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::sales::list))
        .route("/ids", get(handlers::sales::ids))
        .route("/business-ids", get(handlers::sales::business_ids))
        .route("/order-number", get(handlers::sales::order_numbers))
        .route("/customer-names", get(handlers::sales::customer_names))
        .route("/product-names", get(handlers::sales::product_names))
        .route("/sale-prices", get(handlers::sales::sale_prices))
}
