//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::middleware::{default_headers_middleware, error_logging_middleware};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器错误
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr} after {attempts} attempt(s): {source}")]
    Bind {
        addr: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 端口被占用时的重试次数
    pub bind_retries: u32,
    /// 重试间隔
    pub bind_retry_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            bind_retries: 10,
            bind_retry_delay: Duration::from_secs(1),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_bind_retry(mut self, retries: u32, delay: Duration) -> Self {
        self.bind_retries = retries;
        self.bind_retry_delay = delay;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    create_routes(&state.initializers.base_url)
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn_with_state(
            state.initializers.clone(),
            default_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 绑定监听端口
///
/// 仅在地址被占用（`AddrInUse`）时重试，最多 `retries` 次，间隔固定。
pub async fn bind_with_retry(
    addr: &str,
    retries: u32,
    delay: Duration,
) -> Result<TcpListener, ServerError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && attempt <= retries => {
                warn!(
                    "Address {} in use, retrying in {:?} ({}/{})",
                    addr, delay, attempt, retries
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(ServerError::Bind {
                    addr: addr.to_string(),
                    attempts: attempt,
                    source: e,
                })
            }
        }
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

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), ServerError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());
        let addr = self.config.addr();

        let listener = bind_with_retry(
            &addr,
            self.config.bind_retries,
            self.config.bind_retry_delay,
        )
        .await?;

        info!(
            "Skeleton {}API running on {} (with graceful shutdown)",
            if self.state.initializers.env.is_empty() {
                String::new()
            } else {
                format!("{} ", self.state.initializers.env)
            },
            addr
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
