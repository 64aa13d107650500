//! users-api - 用户 CRUD 服务
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - User Context: User 实体、字段校验规则、部分更新变更集
//!
//! 应用层 (application/):
//! - Ports: UserRepositoryPort
//! - Commands: 创建 / 更新 / 删除
//! - Queries: 获取 / 列表 / 存在性
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: `/users` RESTful API
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::{load_config, AppConfig};
