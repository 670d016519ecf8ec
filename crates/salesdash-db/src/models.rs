//! Database row models
//!
//! Direct `FromRow` mappings of the PostgreSQL tables. Outward-facing
//! projections live in the auth and API crates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the `business` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBusiness {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the `sales` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbSale {
    pub id: Uuid,
    pub business_id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub product_name: String,
    pub sale_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for salesdash_auth::UserRecord {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        }
    }
}
