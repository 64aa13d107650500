//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::user::{UserId, ValidationError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: UserId,
    },

    /// 字段校验失败
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: UserId) -> Self {
        Self::NotFound { resource_type, id }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(e) => Self::Validation(e),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}
