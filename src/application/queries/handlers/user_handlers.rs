//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::{GetUser, ListUsers, UserExists};
use crate::domain::user::User;

/// GetUser Handler
///
/// 未找到时返回 `None`，由 HTTP 层决定如何响应
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUser) -> Result<Option<User>, ApplicationError> {
        Ok(self.user_repo.get_user(query.user_id).await?)
    }
}

/// ListUsers Handler
pub struct ListUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl ListUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, _query: ListUsers) -> Result<Vec<User>, ApplicationError> {
        Ok(self.user_repo.list_users().await?)
    }
}

/// UserExists Handler
pub struct UserExistsHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UserExistsHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: UserExists) -> Result<bool, ApplicationError> {
        Ok(self.user_repo.user_exists(query.user_id).await?)
    }
}
