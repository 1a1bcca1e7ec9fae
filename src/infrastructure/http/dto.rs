//! Data Transfer Objects

use serde::Serialize;

use crate::domain::User;

/// 存活检查响应
#[derive(Debug, Serialize)]
pub struct AliveResponse {
    pub status: &'static str,
}

impl AliveResponse {
    pub fn alive() -> Self {
        Self { status: "Alive" }
    }
}

/// 用户详情响应: `{"user": {...}}`
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}
