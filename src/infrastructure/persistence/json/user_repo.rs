//! JSON User Repository - 静态 JSON 文件用户数据源
//!
//! 实现 UserRepositoryPort trait
//!
//! 文件格式：以用户 ID 为键、用户记录为值的 JSON 对象
//! ```json
//! { "1": { "id": 1, "name": "Frodo" } }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;

use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::{User, UserId};

/// JSON 文件用户仓储
///
/// 每次读取都访问磁盘，不缓存。
pub struct JsonUserRepository {
    path: PathBuf,
}

impl JsonUserRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_users(&self, raw: &[u8]) -> Result<HashMap<UserId, User>, RepositoryError> {
        let document: Map<String, Value> = serde_json::from_slice(raw).map_err(|e| {
            RepositoryError::SerializationError(format!("{}: {}", self.path.display(), e))
        })?;

        document
            .into_iter()
            .map(|(key, value)| {
                let id = UserId::parse(key).map_err(|e| {
                    RepositoryError::SerializationError(format!("{}: {}", self.path.display(), e))
                })?;
                let record = match value {
                    Value::Object(record) => record,
                    other => {
                        return Err(RepositoryError::SerializationError(format!(
                            "{}: user {} is not an object: {}",
                            self.path.display(),
                            id,
                            other
                        )))
                    }
                };
                Ok((id.clone(), User::new(id, record)))
            })
            .collect()
    }
}

#[async_trait]
impl UserRepositoryPort for JsonUserRepository {
    async fn find_all(&self) -> Result<HashMap<UserId, User>, RepositoryError> {
        let raw = fs::read(&self.path).await.map_err(|e| {
            RepositoryError::IoError(format!("{}: {}", self.path.display(), e))
        })?;

        let users = self.parse_users(&raw)?;

        tracing::debug!(
            "Loaded users: path={}, count={}",
            self.path.display(),
            users.len()
        );

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn write_store(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("users.json");
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_find_all_keys_records_by_id() {
        let dir = TempDir::new().unwrap();
        let path = write_store(
            &dir,
            r#"{"1": {"id": 1, "name": "Frodo"}, "2": {"id": 2, "name": "Sam"}}"#,
        )
        .await;
        let repo = JsonUserRepository::new(&path);

        let users = repo.find_all().await.unwrap();
        assert_eq!(users.len(), 2);

        let sam = &users[&UserId::parse("2").unwrap()];
        assert_eq!(sam.field("name"), Some(&json!("Sam")));
        assert!(!users.contains_key(&UserId::parse("42").unwrap()));
    }

    #[tokio::test]
    async fn test_reads_from_disk_on_every_call() {
        let dir = TempDir::new().unwrap();
        let path = write_store(&dir, r#"{"1": {"id": 1}}"#).await;
        let repo = JsonUserRepository::new(&path);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        write_store(&dir, r#"{"1": {"id": 1}, "7": {"id": 7}}"#).await;
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let repo = JsonUserRepository::new(dir.path().join("absent.json"));
        assert!(matches!(
            repo.find_all().await,
            Err(RepositoryError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_document_is_serialization_error() {
        let dir = TempDir::new().unwrap();

        let path = write_store(&dir, "not json").await;
        let repo = JsonUserRepository::new(&path);
        assert!(matches!(
            repo.find_all().await,
            Err(RepositoryError::SerializationError(_))
        ));

        write_store(&dir, r#"{"1": "Frodo"}"#).await;
        assert!(matches!(
            repo.find_all().await,
            Err(RepositoryError::SerializationError(_))
        ));

        write_store(&dir, r#"{"frodo": {}}"#).await;
        assert!(matches!(
            repo.find_all().await,
            Err(RepositoryError::SerializationError(_))
        ));
    }
}
