//! User Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateUser, DeleteUser, UpdateUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::user::User;

// ============================================================================
// CreateUser
// ============================================================================

/// CreateUser Handler
pub struct CreateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl CreateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: CreateUser) -> Result<User, ApplicationError> {
        let user = self.user_repo.create_user(&command.user).await?;

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            "User created"
        );

        Ok(user)
    }
}

// ============================================================================
// UpdateUser
// ============================================================================

/// UpdateUser Handler
///
/// 存在性检查由调用方先行完成；此处只处理更新期间用户消失的情况
pub struct UpdateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UpdateUser) -> Result<User, ApplicationError> {
        let user_id = command.user_id;

        let user = match self.user_repo.update_user(user_id, &command.changes).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => {
                return Err(ApplicationError::not_found("User", user_id))
            }
            Err(e) => return Err(e.into()),
        };

        let fields: Vec<&str> = command
            .changes
            .assignments()
            .into_iter()
            .map(|(column, _)| column)
            .collect();
        tracing::info!(user_id, fields = ?fields, "User updated");

        Ok(user)
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

/// DeleteUser Handler
///
/// 返回删除前的快照
pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: DeleteUser) -> Result<User, ApplicationError> {
        let user_id = command.user_id;

        if !self.user_repo.user_exists(user_id).await? {
            return Err(ApplicationError::not_found("User", user_id));
        }

        // exists 与 get 之间不加锁，并发删除时可能读不到
        let user = self
            .user_repo
            .get_user(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", user_id))?;

        self.user_repo.delete_user(user_id).await?;

        tracing::info!(
            user_id,
            username = %user.username,
            "User deleted"
        );

        Ok(user)
    }
}
