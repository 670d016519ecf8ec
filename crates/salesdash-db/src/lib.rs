//! Salesdash Database Layer
//!
//! PostgreSQL for durable data (users, businesses, sales) and Redis for the
//! refresh-session registry.
//!
//! # Repository Pattern
//!
//! Each table has its own repository. The user repository implements the
//! auth crate's `CredentialStore` contract; the Redis session store
//! implements `SessionRegistry`.

pub mod config;
pub mod error;
pub mod models;
pub mod repos;
pub mod sessions;

use deadpool_redis::{Config as RedisConfig, Pool as RedisPool, Runtime};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

pub use config::{DatabaseConfig, PoolSettings};
pub use error::{DbError, DbResult};
pub use models::*;
pub use repos::*;
pub use sessions::RefreshSessionStore;

/// Database connection pools
pub struct Database {
    /// PostgreSQL connection pool
    pub pg: PgPool,
    /// Redis connection pool
    pub redis: RedisPool,
}

impl Database {
    /// Connect to PostgreSQL and Redis
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Connecting to PostgreSQL: {}", config.postgres_url_redacted());

        let pg = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .min_connections(config.pool.min_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .connect(&config.postgres_url)
            .await
            .map_err(|e| DbError::Connection(format!("PostgreSQL: {}", e)))?;

        info!("Connected to PostgreSQL");

        info!("Connecting to Redis: {}", config.redis_url_redacted());

        let redis_cfg = RedisConfig::from_url(&config.redis_url);
        let redis = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DbError::Connection(format!("Redis: {}", e)))?;

        // Test Redis connection
        let mut conn = redis
            .get()
            .await
            .map_err(|e| DbError::Connection(format!("Redis pool: {}", e)))?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| DbError::Connection(format!("Redis ping: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { pg, redis })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pg)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Health check for both databases
    pub async fn health_check(&self) -> DbResult<HealthStatus> {
        let pg_ok = sqlx::query("SELECT 1").fetch_one(&self.pg).await.is_ok();

        let redis_ok = async {
            let mut conn = self.redis.get().await.ok()?;
            let result: Result<String, _> = deadpool_redis::redis::cmd("PING")
                .query_async(&mut *conn)
                .await;
            result.ok()
        }
        .await
        .is_some();

        Ok(HealthStatus {
            postgres: pg_ok,
            redis: redis_ok,
            healthy: pg_ok && redis_ok,
        })
    }

    /// Create repository instances
    pub fn user_repo(&self) -> UserRepo {
        UserRepo::new(self.pg.clone())
    }

    pub fn business_repo(&self) -> BusinessRepo {
        BusinessRepo::new(self.pg.clone())
    }

    pub fn sales_repo(&self) -> SalesRepo {
        SalesRepo::new(self.pg.clone())
    }

    pub fn sessions(&self) -> RefreshSessionStore {
        RefreshSessionStore::new(self.redis.clone())
    }
}

/// Health status of database connections
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub postgres: bool,
    pub redis: bool,
    pub healthy: bool,
}
