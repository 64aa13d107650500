//! users-api - 用户 CRUD 服务
//!
//! 启动流程: .env → 配置 → 日志 → 连接池 → 建表 → HTTP 服务

use std::sync::Arc;

use users_api::config::{load_config, print_config};
use users_api::infrastructure::http::{AppState, HttpServer, ServerConfig};
use users_api::infrastructure::persistence::sqlite::{
    create_pool, ensure_schema, DatabaseConfig, SqliteUserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},users_api={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("users-api v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.database.dir).await?;

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    ensure_schema(&pool).await?;

    // 创建 Repository 适配器，连接池显式注入
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(user_repo);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // 无法监听信号时保持运行
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
