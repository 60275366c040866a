//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`]，覆盖引擎的完整错误分类：
//!
//! | 分类 | 说明 |
//! |------|------|
//! | 输入错误 | 校验失败、缺少必填字段 |
//! | 业务逻辑错误 | 资源不存在、菜品下架、桌台冲突、非法状态流转 |
//! | 权限错误 | 非本人订单、非管理员操作 |
//! | 系统错误 | 数据库错误、内部错误 |
//!
//! 所有错误都是请求级别的：失败只影响当前操作，实体保持原状。

use crate::db::repository::RepoError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 输入错误 ==========
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== 业务逻辑错误 ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 菜品缺失或已下架
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// 资源状态冲突（桌台已被占用等）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 非法状态机流转
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    // ========== 权限错误 ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 系统错误 ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn not_available(msg: impl Into<String>) -> Self {
        Self::NotAvailable(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}
