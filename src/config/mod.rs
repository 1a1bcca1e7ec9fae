//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 环境变量（最高优先级）
//! - 配置文件（按环境名选择）
//! - 默认值（最低优先级）

mod loader;
mod types;

pub use loader::{config_file_stem, load_config, print_config, ConfigError};
pub use types::{
    AccessControlConfig, ApiConfig, AppConfig, DataConfig, LogConfig, ServerConfig,
    DEFAULT_ALLOWED_HEADERS, DEFAULT_ALLOWED_METHODS,
};
