//! Application State
//!
//! - HandlerInitializers: 启动时构建一次、所有 handler 共享的只读配置
//! - AppState: 路由共享状态（初始化参数 + Responder + Query Handlers）

use std::sync::Arc;

use http::header::InvalidHeaderValue;
use http::HeaderValue;
use tracing::Span;

use crate::application::{GetUserHandler, UserRepositoryPort};
use crate::config::{AccessControlConfig, AppConfig};

use super::responder::Responder;

/// CORS 响应头（启动时预先编码）
#[derive(Debug, Clone)]
pub struct AccessControl {
    pub allowed_origin: HeaderValue,
    pub allowed_headers: HeaderValue,
    pub allowed_methods: HeaderValue,
}

impl AccessControl {
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allowed_origin: HeaderValue::from_str(&config.allowed_origin)?,
            allowed_headers: HeaderValue::from_str(&config.allowed_headers.join(","))?,
            allowed_methods: HeaderValue::from_str(&config.allowed_methods.join(","))?,
        })
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self {
            allowed_origin: HeaderValue::from_static("*"),
            allowed_headers: HeaderValue::from_static(
                "Authorization,X-Requested-With,X-Access-Token,X-Service-Token,Content-Type",
            ),
            allowed_methods: HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
        }
    }
}

/// Handler 初始化参数
///
/// `logger` 为显式注入的日志 span，所有 Responder 日志都在该 span 内输出。
#[derive(Debug, Clone)]
pub struct HandlerInitializers {
    pub env: String,
    pub version: String,
    pub contact: String,
    pub base_url: String,
    pub access_control: AccessControl,
    pub logger: Span,
}

impl HandlerInitializers {
    pub fn from_config(config: &AppConfig, logger: Span) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            env: config.env.clone(),
            version: config.api.version.clone(),
            contact: config.contact.clone(),
            base_url: config.api.base_url.clone(),
            access_control: AccessControl::from_config(&config.access_control)?,
            logger,
        })
    }
}

impl Default for HandlerInitializers {
    fn default() -> Self {
        Self {
            env: String::new(),
            version: "v1".to_string(),
            contact: "the API administrator".to_string(),
            base_url: String::new(),
            access_control: AccessControl::default(),
            logger: Span::none(),
        }
    }
}

/// 应用状态
pub struct AppState {
    pub initializers: Arc<HandlerInitializers>,
    pub responder: Responder,

    // ========== Query Handlers ==========
    pub get_user_handler: GetUserHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(initializers: HandlerInitializers, user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        let initializers = Arc::new(initializers);
        Self {
            responder: Responder::new(&initializers),
            initializers,
            get_user_handler: GetUserHandler::new(user_repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_control_joins_lists() {
        let access_control = AccessControl::from_config(&AccessControlConfig {
            allowed_origin: "https://example.com".to_string(),
            allowed_headers: vec!["Authorization".to_string(), "Content-Type".to_string()],
            allowed_methods: vec!["GET".to_string(), "OPTIONS".to_string()],
        })
        .unwrap();

        assert_eq!(access_control.allowed_origin, "https://example.com");
        assert_eq!(access_control.allowed_headers, "Authorization,Content-Type");
        assert_eq!(access_control.allowed_methods, "GET,OPTIONS");
    }

    #[test]
    fn test_access_control_default_matches_config_default() {
        let from_config = AccessControl::from_config(&AccessControlConfig::default()).unwrap();
        let default = AccessControl::default();
        assert_eq!(from_config.allowed_origin, default.allowed_origin);
        assert_eq!(from_config.allowed_headers, default.allowed_headers);
        assert_eq!(from_config.allowed_methods, default.allowed_methods);
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let config = AccessControlConfig {
            allowed_origin: "bad\norigin".to_string(),
            ..AccessControlConfig::default()
        };
        assert!(AccessControl::from_config(&config).is_err());
    }

    #[test]
    fn test_initializers_from_config() {
        let mut config = AppConfig::default();
        config.env = "prod".to_string();
        config.contact = "ops@example.com".to_string();
        config.api.base_url = "/api".to_string();

        let initializers = HandlerInitializers::from_config(&config, Span::none()).unwrap();
        assert_eq!(initializers.env, "prod");
        assert_eq!(initializers.contact, "ops@example.com");
        assert_eq!(initializers.base_url, "/api");
        assert_eq!(initializers.version, "v1");
    }
}
