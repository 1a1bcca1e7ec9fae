//! User Context - Value Objects

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 非法的用户 ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的用户 ID: {0}")]
pub struct InvalidUserId(pub String);

/// 用户唯一标识
///
/// 路由只接受纯数字 ID，数据源中以字符串作为键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidUserId> {
        let raw = raw.into();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidUserId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
