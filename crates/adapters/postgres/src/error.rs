//! sqlx 错误到 `PersistenceError` 的映射

use bank_errors::PersistenceError;

/// SQLSTATE 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlStateClass {
    /// 23xxx 完整性约束冲突
    IntegrityConstraint,
    /// 08xxx 连接异常、57P01..57P03 服务端关闭
    Connection,
    Other,
}

/// 按 SQLSTATE 前缀分类
pub fn classify_sqlstate(code: &str) -> SqlStateClass {
    if code.starts_with("23") {
        SqlStateClass::IntegrityConstraint
    } else if code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03") {
        SqlStateClass::Connection
    } else {
        SqlStateClass::Other
    }
}

/// 将 sqlx 错误转换为持久化错误，`context` 描述失败的操作
pub fn map_sqlx_error(context: &str, err: sqlx::Error) -> PersistenceError {
    let message = format!("{}: {}", context, err);
    match &err {
        sqlx::Error::Database(db_err) => {
            let class = db_err
                .code()
                .map(|code| classify_sqlstate(&code))
                .unwrap_or(SqlStateClass::Other);
            match class {
                SqlStateClass::IntegrityConstraint => PersistenceError::ConstraintViolation(message),
                SqlStateClass::Connection => PersistenceError::Unavailable(message),
                SqlStateClass::Other => PersistenceError::Query(message),
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => PersistenceError::Unavailable(message),
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Configuration(_) => PersistenceError::Internal(message),
        _ => PersistenceError::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sqlstate() {
        assert_eq!(classify_sqlstate("23505"), SqlStateClass::IntegrityConstraint);
        assert_eq!(classify_sqlstate("23502"), SqlStateClass::IntegrityConstraint);
        assert_eq!(classify_sqlstate("08006"), SqlStateClass::Connection);
        assert_eq!(classify_sqlstate("57P01"), SqlStateClass::Connection);
        assert_eq!(classify_sqlstate("42P01"), SqlStateClass::Other);
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        let err = map_sqlx_error("Failed to find account", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, PersistenceError::Unavailable(_)));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Failed to find account"));

        let err = map_sqlx_error("Failed to save account", sqlx::Error::PoolClosed);
        assert!(matches!(err, PersistenceError::Unavailable(_)));
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = map_sqlx_error("Failed to create pool", sqlx::Error::Io(io));
        assert!(matches!(err, PersistenceError::Unavailable(_)));
    }

    #[test]
    fn test_decode_errors_are_internal() {
        let err = map_sqlx_error(
            "Failed to read account",
            sqlx::Error::ColumnNotFound("holder_name".to_string()),
        );
        assert!(matches!(err, PersistenceError::Internal(_)));
    }

    #[test]
    fn test_row_not_found_is_query_error() {
        let err = map_sqlx_error("Failed to count accounts", sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Query(_)));
        assert!(!err.is_retryable());
    }
}
