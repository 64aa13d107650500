//! HTTP Routes
//!
//! API Endpoints:
//! - /users        GET     列出所有用户
//! - /users        POST    创建用户
//! - /users/:id    GET     获取用户
//! - /users/:id    PUT     部分更新用户
//! - /users/:id    DELETE  删除用户

use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::middleware::user_id_guard;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().merge(user_routes())
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    // id 校验只作用于 /users/:id
    let member = Router::new()
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn(user_id_guard));

    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .merge(member)
}
