//! bank-errors - 持久化错误类型
//!
//! 存储边界只暴露一种错误：`PersistenceError`，按失败原因细分

use thiserror::Error;

/// 持久化错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// 存储不可达（连接失败、连接池超时或已关闭）
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// 唯一性 / 完整性约束冲突
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// 查询参数不合法（未知排序字段、页大小为 0 等），未访问存储
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// 其他数据库错误
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistenceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn constraint_violation(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 是否值得重试
    ///
    /// 只有存储不可达属于暂时性故障，其余错误重试也不会成功。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// 用于日志和指标标签的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::InvalidQuery(_) => "invalid_query",
            Self::Query(_) => "query",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result 类型别名
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(PersistenceError::unavailable("pool timed out").is_retryable());
        assert!(!PersistenceError::constraint_violation("duplicate key").is_retryable());
        assert!(!PersistenceError::invalid_query("unknown sort property").is_retryable());
        assert!(!PersistenceError::query("syntax error").is_retryable());
        assert!(!PersistenceError::internal("bad row").is_retryable());
    }

    #[test]
    fn test_display_and_kind() {
        let err = PersistenceError::constraint_violation("accounts_pkey");
        assert_eq!(err.to_string(), "Constraint violation: accounts_pkey");
        assert_eq!(err.kind(), "constraint_violation");
        assert_eq!(PersistenceError::unavailable("x").kind(), "unavailable");
    }
}
