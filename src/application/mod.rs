//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod queries;

pub use error::ApplicationError;

pub use ports::{RepositoryError, UserRepositoryPort};

pub use queries::{handlers::GetUserHandler, GetUser};
