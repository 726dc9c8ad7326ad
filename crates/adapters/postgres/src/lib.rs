//! bank-adapter-postgres - PostgreSQL 适配器
//!
//! 连接池、迁移和 sqlx 错误分类，供各服务的仓储实现复用

mod config;
mod connection;
mod error;
mod migration;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use migration::*;
