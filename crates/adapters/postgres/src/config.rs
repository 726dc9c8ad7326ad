//! PostgreSQL 配置模块
//!
//! 连接池和启动重试设置

use std::time::Duration;

use bank_common::RetryConfig;

/// PostgreSQL 配置
#[derive(Clone)]
pub struct PostgresConfig {
    /// 数据库 URL
    pub url: String,
    /// 最小连接数
    pub pool_min: u32,
    /// 最大连接数
    pub pool_max: u32,
    /// 获取连接超时
    pub acquire_timeout: Duration,
    /// 空闲超时
    pub idle_timeout: Duration,
    /// 连接最大生命周期
    pub max_lifetime: Option<Duration>,
    /// 应用名称（用于连接标识）
    pub application_name: Option<String>,
    /// 建立连接池时的重试策略
    pub retry: RetryConfig,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_min: 1,
            pool_max: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Some(Duration::from_secs(1800)),
            application_name: None,
            retry: RetryConfig::default(),
        }
    }
}

// URL 可能包含密码，Debug 输出中隐藏
impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &"[REDACTED]")
            .field("pool_min", &self.pool_min)
            .field("pool_max", &self.pool_max)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .field("application_name", &self.application_name)
            .field("retry", &self.retry)
            .finish()
    }
}

impl PostgresConfig {
    /// 从 URL 创建配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 设置连接池配置，`min` 不超过 `max`
    pub fn with_pool(mut self, min: u32, max: u32) -> Self {
        self.pool_max = max.max(1);
        self.pool_min = min.min(self.pool_max);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
