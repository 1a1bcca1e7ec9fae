//! User Context - 用户上下文
//!
//! 职责:
//! - 用户标识校验
//! - 用户记录（只读，来自静态数据源）

mod entity;
mod value_objects;

pub use entity::User;
pub use value_objects::{InvalidUserId, UserId};
