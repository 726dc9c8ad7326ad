//! 领域层

pub mod entities;
pub mod repositories;
