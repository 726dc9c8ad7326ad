//! Account Service Library
//!
//! 银行账户的持久化边界：
//! - `domain`: Account 实体与 `AccountRepository` trait
//! - `infrastructure`: 内存 / PostgreSQL 实现及可观测性装饰器
//! - `bootstrap`: 按配置组装账户存储

pub mod bootstrap;
pub mod domain;
pub mod error;
pub mod infrastructure;
