//! PostgreSQL 连接管理

use std::str::FromStr;

use bank_common::with_retry_if;
use bank_errors::{PersistenceError, PersistenceResult};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::config::PostgresConfig;
use crate::error::map_sqlx_error;

/// 创建 PostgreSQL 连接池（单次尝试）
pub async fn create_pool(config: &PostgresConfig) -> PersistenceResult<PgPool> {
    let mut options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| PersistenceError::internal(format!("Invalid database url: {}", e)))?;
    if let Some(ref name) = config.application_name {
        options = options.application_name(name);
    }

    PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error("Failed to create pool", e))
}

/// 创建连接池，存储不可达时按配置退避重试
pub async fn connect_with_retry(config: &PostgresConfig) -> PersistenceResult<PgPool> {
    let pool = with_retry_if(
        &config.retry,
        "PostgreSQL connection",
        || create_pool(config),
        PersistenceError::is_retryable,
    )
    .await?;

    info!(
        max_connections = config.pool_max,
        min_connections = config.pool_min,
        "PostgreSQL connection pool created"
    );
    Ok(pool)
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> PersistenceResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("Database health check failed", e))?;
    Ok(())
}
