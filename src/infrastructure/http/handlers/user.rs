//! User HTTP Handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::application::{CreateUser, DeleteUser, GetUser, ListUsers, UpdateUser, UserExists};
use crate::domain::user::User;
use crate::infrastructure::http::dto::UserPayload;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::UserIdParam;
use crate::infrastructure::http::state::AppState;

/// GET /users - 列出所有用户
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.list_users_handler.handle(ListUsers).await?;
    Ok(Json(users))
}

/// POST /users - 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: UserPayload,
) -> Result<Json<User>, ApiError> {
    let user = payload.into_new_user()?;
    let created = state.create_user_handler.handle(CreateUser { user }).await?;
    Ok(Json(created))
}

/// GET /users/:id - 获取用户，不存在时返回 404 + `null`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(UserIdParam(user_id)): Extension<UserIdParam>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.get_user_handler.handle(GetUser { user_id }).await?;
    let status = if user.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(user)))
}

/// PUT /users/:id - 部分更新用户
///
/// 先检查存在性（404），再校验已提供的字段（406）
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(UserIdParam(user_id)): Extension<UserIdParam>,
    payload: UserPayload,
) -> Result<Json<User>, ApiError> {
    if !state.user_exists_handler.handle(UserExists { user_id }).await? {
        return Err(ApiError::UserNotFound);
    }

    let changes = payload.into_changes()?;
    let updated = state
        .update_user_handler
        .handle(UpdateUser { user_id, changes })
        .await?;
    Ok(Json(updated))
}

/// DELETE /users/:id - 删除用户，返回删除前的快照
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(UserIdParam(user_id)): Extension<UserIdParam>,
) -> Result<Json<User>, ApiError> {
    let deleted = state
        .delete_user_handler
        .handle(DeleteUser { user_id })
        .await?;
    Ok(Json(deleted))
}
