//! 基础设施层
//!
//! - HTTP: RESTful API
//! - Persistence: 静态 JSON 数据源

pub mod http;
pub mod persistence;
