//! 服务启动错误

use bank_config::ConfigError;
use bank_errors::PersistenceError;
use bank_telemetry::TelemetryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
