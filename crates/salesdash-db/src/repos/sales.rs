//! Sales repository (read-only)

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbResult, DbSale};

/// Read-only queries over the `sales` table
pub struct SalesRepo {
    pool: PgPool,
}

impl SalesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All sale rows
    pub async fn list(&self) -> DbResult<Vec<DbSale>> {
        let rows = sqlx::query_as::<_, DbSale>(
            r#"
            SELECT id, business_id, order_number, customer_name, product_name,
                   sale_price, created_at
            FROM sales
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All sale IDs
    pub async fn ids(&self) -> DbResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM sales ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Selling business IDs
    pub async fn business_ids(&self) -> DbResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT business_id FROM sales ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Order numbers
    pub async fn order_numbers(&self) -> DbResult<Vec<String>> {
        let values =
            sqlx::query_scalar::<_, String>("SELECT order_number FROM sales ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(values)
    }

    /// Customer names
    pub async fn customer_names(&self) -> DbResult<Vec<String>> {
        let values =
            sqlx::query_scalar::<_, String>("SELECT customer_name FROM sales ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(values)
    }

    /// Product names
    pub async fn product_names(&self) -> DbResult<Vec<String>> {
        let values =
            sqlx::query_scalar::<_, String>("SELECT product_name FROM sales ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(values)
    }

    /// Sale prices
    pub async fn sale_prices(&self) -> DbResult<Vec<Decimal>> {
        let values =
            sqlx::query_scalar::<_, Decimal>("SELECT sale_price FROM sales ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(values)
    }
}
