//! User Context - 用户限界上下文
//!
//! 职责:
//! - User 实体定义
//! - 字段校验规则（路由层与数据层共用）
//! - 部分更新的变更集

mod entity;
mod errors;
mod validation;

pub use entity::{NewUser, User, UserChanges, UserId};
pub use errors::ValidationError;
pub use validation::{valid_email, valid_password, valid_username};
