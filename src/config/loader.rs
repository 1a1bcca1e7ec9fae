//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config/skeleton[.{env}].toml|yaml|json）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::{Path, PathBuf};
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

/// 配置文件基础名（不含扩展名）
const CONFIG_FILE_STEM: &str = "config/skeleton";

/// 环境变量前缀
const ENV_PREFIX: &str = "SKELETON";

/// 根据环境名计算配置文件路径（不含扩展名）
///
/// - `env = ""`      -> `config/skeleton`
/// - `env = "prod"`  -> `config/skeleton.prod`
pub fn config_file_stem(search_path: Option<&Path>, env: &str) -> PathBuf {
    let name = if env.is_empty() {
        CONFIG_FILE_STEM.to_string()
    } else {
        format!("{}.{}", CONFIG_FILE_STEM, env)
    };

    match search_path {
        Some(path) => path.join(name),
        None => PathBuf::from(name),
    }
}

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SKELETON_`，层级分隔符 `__`）
/// 2. 配置文件（由环境名选择，文件不存在时忽略）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SKELETON_API__PORT=8080`
/// - `SKELETON_API__BASE_URL=/api`
/// - `SKELETON_CONTACT=ops@example.com`
/// - `SKELETON_DATA__USERS_PATH=/data/users.json`
pub fn load_config(search_path: Option<&Path>, env: &str) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("api.host", "0.0.0.0")?
        .set_default("api.port", 8888)?
        .set_default("api.base_url", "")?
        .set_default("api.version", "v1")?
        .set_default("debug", false)?
        .set_default("server.bind_retries", 10)?
        .set_default("server.bind_retry_delay_ms", 1000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（可选）
    let stem = config_file_stem(search_path, env);
    builder = builder.add_source(File::with_name(&stem.to_string_lossy()).required(false));

    // 3. 环境变量（最高优先级）
    // 例如: SKELETON_API__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;
    app_config.env = env.to_string();

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.api.port == 0 {
        return Err(ConfigError::ValidationError(
            "API port cannot be 0".to_string(),
        ));
    }

    // base_url 要么为空，要么以 "/" 开头且不以 "/" 结尾
    let base_url = &config.api.base_url;
    if !base_url.is_empty() && (!base_url.starts_with('/') || base_url.ends_with('/')) {
        return Err(ConfigError::ValidationError(format!(
            "API base_url must start with '/' and not end with '/': {:?}",
            base_url
        )));
    }

    if config.data.users_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Users data path cannot be empty".to_string(),
        ));
    }

    if config.access_control.allowed_methods.is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one allowed method is required".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Environment: {}", if config.env.is_empty() { "default" } else { config.env.as_str() });
    tracing::info!("Server: {}", config.api.addr());
    tracing::info!("Base URL: {:?}", config.api.base_url);
    tracing::info!("API Version: {}", config.api.version);
    tracing::info!("Debug: {}", config.debug);
    tracing::info!("Users Data: {:?}", config.data.users_path);
    tracing::info!("Allowed Origin: {}", config.access_control.allowed_origin);
    tracing::info!(
        "Bind Retries: {} (every {}ms)",
        config.server.bind_retries,
        config.server.bind_retry_delay_ms
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, file_name: &str, content: &str) {
        let config_dir = dir.path().join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(file_name), content).unwrap();
    }

    #[test]
    fn test_config_file_stem() {
        assert_eq!(config_file_stem(None, ""), PathBuf::from("config/skeleton"));
        assert_eq!(
            config_file_stem(Some(Path::new("/srv")), "prod"),
            PathBuf::from("/srv/config/skeleton.prod")
        );
    }

    #[test]
    fn test_load_from_environment_file() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "skeleton.staging.toml",
            r#"
contact = "ops@example.com"
debug = true

[api]
port = 9090
base_url = "/skeleton"
version = "v2"

[access_control]
allowed_origin = "https://example.com"
"#,
        );

        let config = load_config(Some(dir.path()), "staging").unwrap();
        assert_eq!(config.env, "staging");
        assert_eq!(config.contact, "ops@example.com");
        assert!(config.debug);
        assert_eq!(config.api.port, 9090);
        assert_eq!(config.api.base_url, "/skeleton");
        assert_eq!(config.api.version, "v2");
        assert_eq!(config.access_control.allowed_origin, "https://example.com");
        // 未配置的列表保留默认值
        assert!(config
            .access_control
            .allowed_methods
            .iter()
            .any(|m| m == "OPTIONS"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(dir.path()), "nowhere").unwrap();
        assert_eq!(config.api.port, 8888);
        assert_eq!(config.api.base_url, "");
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.api.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "api".to_string();
        assert!(validate_config(&config).is_err());

        config.api.base_url = "/api/".to_string();
        assert!(validate_config(&config).is_err());

        config.api.base_url = "/api".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_users_path() {
        let mut config = AppConfig::default();
        config.data.users_path = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_no_allowed_methods() {
        let mut config = AppConfig::default();
        config.access_control.allowed_methods.clear();
        assert!(validate_config(&config).is_err());
    }
}
