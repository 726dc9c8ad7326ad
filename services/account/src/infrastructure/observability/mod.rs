//! 可观测性

mod instrumented_account_repository;
pub mod metrics;

pub use instrumented_account_repository::*;
