//! User Commands

use crate::domain::user::{NewUser, UserChanges, UserId};

/// 创建用户命令
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user: NewUser,
}

/// 部分更新用户命令
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub changes: UserChanges,
}

/// 删除用户命令
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: UserId,
}
