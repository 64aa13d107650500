//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600));

        create_routes()
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await?;
        info!(
            "Listening on {} (direct URL: http://localhost:{})",
            addr, self.config.port
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, ensure_schema, DatabaseConfig, SqliteUserRepository,
    };
    use axum::{
        body::Body,
        http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    #[test]
    fn test_server_addr() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:3000");
        assert_eq!(ServerConfig::new("127.0.0.1", 8080).addr(), "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_router_allows_cross_origin_requests() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        let state = AppState::new(Arc::new(SqliteUserRepository::new(pool)));
        let server = HttpServer::new(ServerConfig::default(), state);

        let request = Request::builder()
            .uri("/users")
            .header("origin", "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = server.build_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
