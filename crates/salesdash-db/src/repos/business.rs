//! Business repository (read-only)

use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbBusiness, DbResult};

/// Read-only queries over the `business` table
pub struct BusinessRepo {
    pool: PgPool,
}

impl BusinessRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All business rows
    pub async fn list(&self) -> DbResult<Vec<DbBusiness>> {
        let rows = sqlx::query_as::<_, DbBusiness>(
            r#"
            SELECT id, user_id, business_name, created_at
            FROM business
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All business IDs
    pub async fn ids(&self) -> DbResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM business ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Owning user IDs
    pub async fn user_ids(&self) -> DbResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM business ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Business names
    pub async fn names(&self) -> DbResult<Vec<String>> {
        let names =
            sqlx::query_scalar::<_, String>("SELECT business_name FROM business ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(names)
    }
}
