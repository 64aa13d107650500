//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容环境变量 `SERVER_PORT`、`DB_NAME`
//! 2. 环境变量（前缀 `USERS_API_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "USERS_API";

/// 加载应用配置
///
/// # 环境变量示例
/// - `USERS_API_SERVER__HOST=127.0.0.1`
/// - `USERS_API_SERVER__PORT=8080`（或 `SERVER_PORT=8080`）
/// - `USERS_API_DATABASE__NAME=users`（或 `DB_NAME=users`）
/// - `USERS_API_LOG__JSON=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(config_path, None)
}

/// `env` 为 None 时读取进程环境变量
fn load_with_env(
    config_path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let var = |key: &str| match &env {
        Some(map) => map.get(key).cloned(),
        None => std::env::var(key).ok(),
    };

    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.dir", "data")?
        .set_default("database.name", "users")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量，层级分隔符 `__`
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env.clone()),
    );

    // 4. 兼容的无前缀环境变量
    builder = builder
        .set_override_option("server.port", var("SERVER_PORT"))?
        .set_override_option("database.name", var("DB_NAME"))?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.name.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database name cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max connections cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Database: {}", config.database.path().display());
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("Log JSON: {}", config.log.json);
    tracing::info!("=================================");
}
