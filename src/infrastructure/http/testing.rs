//! 测试辅助

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Bytes, response::Response};
use serde_json::{json, Value};

use crate::application::{RepositoryError, UserRepositoryPort};
use crate::domain::{User, UserId};

use super::state::{AppState, HandlerInitializers};

pub(crate) struct StaticUserRepository(HashMap<UserId, User>);

impl StaticUserRepository {
    pub(crate) fn with_users(users: Value) -> Self {
        let users = users
            .as_object()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                let id = UserId::parse(key).unwrap();
                let record = value.as_object().cloned().unwrap();
                (id.clone(), User::new(id, record))
            })
            .collect();
        Self(users)
    }
}

#[async_trait]
impl UserRepositoryPort for StaticUserRepository {
    async fn find_all(&self) -> Result<HashMap<UserId, User>, RepositoryError> {
        Ok(self.0.clone())
    }
}

pub(crate) fn sample_users() -> Value {
    json!({
        "1": {"id": 1, "name": "Frodo Baggins"},
        "2": {"id": 2, "name": "Samwise Gamgee"}
    })
}

pub(crate) fn test_initializers() -> HandlerInitializers {
    HandlerInitializers {
        contact: "support@example.com".to_string(),
        ..HandlerInitializers::default()
    }
}

pub(crate) fn test_state() -> Arc<AppState> {
    test_state_with(test_initializers(), Arc::new(StaticUserRepository::with_users(sample_users())))
}

pub(crate) fn test_state_with(
    initializers: HandlerInitializers,
    user_repo: Arc<dyn UserRepositoryPort>,
) -> Arc<AppState> {
    Arc::new(AppState::new(initializers, user_repo))
}

pub(crate) async fn read_body(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub(crate) async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}
