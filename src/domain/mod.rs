//! Domain Layer - 领域层
//!
//! - Error Codes: 应用错误码注册表
//! - User Context: 用户资源

pub mod error_code;
pub mod user;

pub use error_code::{ErrorCode, UnknownErrorCode};
pub use user::{InvalidUserId, User, UserId};
