//! 服务组装
//!
//! 根据配置初始化遥测并构建账户存储

use std::sync::Arc;
use std::time::Duration;

use bank_adapter_postgres::{MigrationRunner, PostgresConfig, check_connection, connect_with_retry};
use bank_common::RetryConfig;
use bank_config::{AppConfig, StoreBackend};
use bank_telemetry::{PrometheusHandle, init_metrics, init_tracing, init_tracing_json};
use secrecy::ExposeSecret;
use tracing::info;

use crate::domain::repositories::AccountRepository;
use crate::error::ServiceResult;
use crate::infrastructure::observability::InstrumentedAccountRepository;
use crate::infrastructure::persistence::{
    InMemoryAccountRepository, PostgresAccountRepository, account_migrations,
};

/// 初始化日志和指标，返回 Prometheus handle（未启用时为 None）
pub fn init_runtime(config: &AppConfig) -> ServiceResult<Option<PrometheusHandle>> {
    if config.use_json_logs() {
        init_tracing_json(&config.telemetry.log_level)?;
    } else {
        init_tracing(&config.telemetry.log_level)?;
    }

    let handle = if config.telemetry.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        metrics_enabled = config.telemetry.metrics_enabled,
        "Runtime initialized"
    );
    Ok(handle)
}

/// 由应用配置生成连接池配置
pub fn postgres_config(config: &AppConfig) -> ServiceResult<PostgresConfig> {
    let db = config.database()?;
    let retry = RetryConfig::new(
        db.connect_attempts,
        Duration::from_millis(200),
        Duration::from_secs(5),
    );

    Ok(PostgresConfig::new(db.url.expose_secret().as_str())
        .with_pool(db.min_connections, db.max_connections)
        .with_acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
        .with_application_name(config.app_name.as_str())
        .with_retry(retry))
}

/// 按配置的后端构建账户存储，外层包裹日志和指标装饰器
pub async fn build_account_repository(
    config: &AppConfig,
) -> ServiceResult<Arc<dyn AccountRepository>> {
    let repository: Arc<dyn AccountRepository> = match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory account store");
            Arc::new(InstrumentedAccountRepository::new("memory", InMemoryAccountRepository::new()))
        }
        StoreBackend::Postgres => {
            let pg_config = postgres_config(config)?;
            let pool = connect_with_retry(&pg_config).await?;
            check_connection(&pool).await?;

            if config.database()?.run_migrations {
                let report = MigrationRunner::new(pool.clone())
                    .run(&account_migrations())
                    .await?;
                info!(
                    applied = report.applied.len(),
                    skipped = report.skipped.len(),
                    "Account migrations finished"
                );
            }

            let store = PostgresAccountRepository::new(pool);
            Arc::new(InstrumentedAccountRepository::new("postgres", store))
        }
    };

    Ok(repository)
}
