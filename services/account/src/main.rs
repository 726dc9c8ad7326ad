//! Account Service - 账户存储启动入口
//!
//! 加载配置、初始化遥测、构建账户存储并检查可用性

use account_service::bootstrap::{build_account_repository, init_runtime};
use bank_config::AppConfig;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;
    let metrics_handle = init_runtime(&config)?;

    let accounts = build_account_repository(&config).await?;
    let total = accounts.count().await?;
    info!(
        backend = ?config.store.backend,
        accounts = total,
        "Account store ready"
    );

    if let Some(handle) = metrics_handle {
        debug!(metrics = %handle.render(), "Metrics snapshot");
    }

    Ok(())
}
