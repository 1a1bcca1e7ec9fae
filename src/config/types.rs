//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 默认允许的请求头
pub const DEFAULT_ALLOWED_HEADERS: &[&str] = &[
    "Authorization",
    "X-Requested-With",
    "X-Access-Token",
    "X-Service-Token",
    "Content-Type",
];

/// 默认允许的方法
pub const DEFAULT_ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 运行环境名（决定配置文件名，不从文件读取）
    #[serde(skip)]
    pub env: String,

    /// 出错时展示给客户端的联系方式
    #[serde(default = "default_contact")]
    pub contact: String,

    /// 调试模式
    #[serde(default)]
    pub debug: bool,

    /// API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// CORS 配置
    #[serde(default)]
    pub access_control: AccessControlConfig,

    /// 数据源配置
    #[serde(default)]
    pub data: DataConfig,

    /// 服务器启动配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: String::new(),
            contact: default_contact(),
            debug: false,
            api: ApiConfig::default(),
            access_control: AccessControlConfig::default(),
            data: DataConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_contact() -> String {
    "the API administrator".to_string()
}

/// API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 路由前缀，如 "/api"；空字符串表示根路径
    #[serde(default)]
    pub base_url: String,

    /// API 版本
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_version() -> String {
    "v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: String::new(),
            version: default_version(),
        }
    }
}

impl ApiConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct AccessControlConfig {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,

    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
}

fn default_allowed_origin() -> String {
    "*".to_string()
}

fn default_allowed_headers() -> Vec<String> {
    DEFAULT_ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn default_allowed_methods() -> Vec<String> {
    DEFAULT_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect()
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allowed_headers: default_allowed_headers(),
            allowed_methods: default_allowed_methods(),
        }
    }
}

/// 数据源配置
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// 用户 JSON 文件路径
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,
}

fn default_users_path() -> PathBuf {
    PathBuf::from("data/users.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            users_path: default_users_path(),
        }
    }
}

/// 服务器启动配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 端口被占用时的绑定重试次数
    #[serde(default = "default_bind_retries")]
    pub bind_retries: u32,

    /// 两次绑定重试之间的间隔（毫秒）
    #[serde(default = "default_bind_retry_delay_ms")]
    pub bind_retry_delay_ms: u64,
}

fn default_bind_retries() -> u32 {
    10
}

fn default_bind_retry_delay_ms() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_retries: default_bind_retries(),
            bind_retry_delay_ms: default_bind_retry_delay_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
