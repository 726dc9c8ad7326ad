//! 持久化实现

mod in_memory_account_repository;
mod migrations;
mod postgres_account_repository;

pub use in_memory_account_repository::*;
pub use migrations::*;
pub use postgres_account_repository::*;
