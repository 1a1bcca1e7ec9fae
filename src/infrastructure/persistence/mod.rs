//! Persistence Layer - 持久化层
//!
//! - JSON: 只读的静态用户数据源

pub mod json;
