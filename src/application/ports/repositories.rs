//! Repository Ports - 出站端口
//!
//! 定义数据读取的抽象接口
//! 具体实现在 infrastructure 层（如 JSON 文件）

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{User, UserId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

// ============================================================================
// User Repository
// ============================================================================

/// User Repository 端口（只读）
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 读取完整的用户集合（以 ID 为键）
    async fn find_all(&self) -> Result<HashMap<UserId, User>, RepositoryError>;
}
