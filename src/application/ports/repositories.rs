//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserChanges, UserId, ValidationError};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// User Repository Port
///
/// 写操作（create/update）在执行 SQL 前自行校验字段，不依赖调用方已校验。
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 获取所有用户（无排序保证）
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// 根据 ID 查找用户
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// 用户是否存在
    async fn user_exists(&self, id: UserId) -> Result<bool, RepositoryError>;

    /// 创建用户，返回重新读取的持久化实体
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// 部分更新用户，返回更新后的实体
    async fn update_user(&self, id: UserId, changes: &UserChanges)
        -> Result<User, RepositoryError>;

    /// 删除用户，返回是否有行被删除
    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError>;
}
