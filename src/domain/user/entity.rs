//! User Context - Entity

use serde::Serialize;
use serde_json::{Map, Value};

use super::UserId;

/// 用户实体
///
/// 字段原样来自数据源，序列化时输出原始记录。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip)]
    id: UserId,
    #[serde(flatten)]
    record: Map<String, Value>,
}

impl User {
    pub fn new(id: UserId, record: Map<String, Value>) -> Self {
        Self { id, record }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// 读取单个字段
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }
}
