//! HTTP Layer - RESTful API
//!
//! - Responder: 统一成功/错误响应
//! - ResponseErrors: 错误码 -> 错误信封目录
//! - body: 写方法请求体预处理
//! - middleware: 默认响应头、错误日志

pub mod body;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responder;
pub mod response_errors;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use body::{prepare_body, BodyRejection, JsonEnvelope};
pub use error::{ApiError, ErrorCodeMismatch};
pub use responder::Responder;
pub use response_errors::{ResponseError, ResponseErrors};
pub use routes::create_routes;
pub use server::{bind_with_retry, build_router, HttpServer, ServerConfig, ServerError};
pub use state::{AccessControl, AppState, HandlerInitializers};
