//! ports - 抽象 trait 层
//!
//! 定义存储边界的抽象接口，具体实现由各服务的基础设施层提供

mod repository;

pub use repository::*;
