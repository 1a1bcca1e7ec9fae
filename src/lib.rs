//! Skeleton API - 最小 REST API 骨架
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - ErrorCode: 应用错误码注册表
//! - User Context: 用户资源
//!
//! 应用层 (application/):
//! - Ports: UserRepositoryPort
//! - Queries: GetUser 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 路由、统一响应、错误信封、请求体预处理
//! - Persistence: 静态 JSON 用户数据源

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
