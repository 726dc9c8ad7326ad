//! domain-core - 跨 context 的领域核心类型
//!
//! 包含实体抽象和少数共享的值对象

mod entity;
mod money;

pub use entity::*;
pub use money::*;
