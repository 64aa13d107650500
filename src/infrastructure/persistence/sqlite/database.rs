//! SQLite Database - 连接池与建表

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库 URL
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    /// 内存数据库，每个连接各自独立，因此只用一个连接
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "SQLite pool created with WAL mode and busy_timeout=5000ms"
    );

    Ok(pool)
}

/// 创建 users 表（幂等，不做版本化迁移）
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema ready");
    Ok(())
}
