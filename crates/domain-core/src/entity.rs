//! 实体基础 trait

/// 实体 trait
///
/// 标识由存储分配，尚未持久化的实体没有标识。
pub trait Entity {
    type Id;

    fn id(&self) -> Option<&Self::Id>;

    /// 是否尚未持久化
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
