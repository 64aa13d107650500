//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - User Context: 用户管理

pub mod user;
