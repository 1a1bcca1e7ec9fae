//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod user_handlers;

pub use user_handlers::*;
