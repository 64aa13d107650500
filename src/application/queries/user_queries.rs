//! User Queries

use crate::domain::user::UserId;

/// 获取用户详情查询
#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: UserId,
}

/// 列出所有用户查询
#[derive(Debug, Clone)]
pub struct ListUsers;

/// 用户是否存在查询
#[derive(Debug, Clone)]
pub struct UserExists {
    pub user_id: UserId,
}
