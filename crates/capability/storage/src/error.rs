//! 存储层错误类型
//!
//! 定义统一的存储错误类型，用于封装底层错误：
//! - SQL 执行错误
//! - 连接错误
//! - 数据一致性错误（重复主键、库存不足等）

/// 错误类别，供 handler 映射 HTTP 状态码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Internal,
    Conflict,
    Invalid,
}

#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Internal,
            message: message.into(),
        }
    }

    /// 唯一性冲突（如房间号重复）。
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Conflict,
            message: message.into(),
        }
    }

    /// 请求与当前数据不一致（如库存调整后为负）。
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Invalid,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::conflict(db_err.message().to_string());
            }
        }
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("document encoding: {err}"))
    }
}

impl From<domain::DomainError> for StorageError {
    fn from(err: domain::DomainError) -> Self {
        Self::new(format!("stored value: {err}"))
    }
}
