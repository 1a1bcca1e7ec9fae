//! Skeleton API - 启动入口
//!
//! 环境变量：
//! - `SKELETON_ENV`: 运行环境名（选择 `config/skeleton.{env}.*`）
//! - `SKELETON_PATH`: 配置文件搜索根目录

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use skeleton_api::config::{load_config, print_config, AppConfig};
use skeleton_api::infrastructure::http::{AppState, HandlerInitializers, HttpServer, ServerConfig};
use skeleton_api::infrastructure::persistence::json::JsonUserRepository;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},skeleton_api={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("SKELETON_ENV").unwrap_or_default();
    let search_path = std::env::var("SKELETON_PATH")
        .ok()
        .filter(|p| !p.is_empty() && env != "local")
        .map(PathBuf::from);

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config(search_path.as_deref(), &env)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Skeleton API");
    print_config(&config);

    // 显式注入的日志 span，所有 handler 共享
    let logger = tracing::info_span!("api", env = %config.env, version = %config.api.version);
    let initializers = HandlerInitializers::from_config(&config, logger)
        .map_err(|e| anyhow::anyhow!("Invalid access control header: {}", e))?;

    let user_repo = Arc::new(JsonUserRepository::new(&config.data.users_path));
    let state = AppState::new(initializers, user_repo);

    // 错误目录自检：每个错误码都必须能生成完整的错误信封
    state
        .responder
        .catalog()
        .self_check()
        .map_err(|e| anyhow::anyhow!("Error catalog self-check failed: {}", e))?;

    let server_config = ServerConfig::new(&config.api.host, config.api.port).with_bind_retry(
        config.server.bind_retries,
        Duration::from_millis(config.server.bind_retry_delay_ms),
    );
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
