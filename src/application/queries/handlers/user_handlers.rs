//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::GetUser;
use crate::domain::{User, UserId};

/// GetUser Handler
///
/// 每次调用都重新读取完整的用户集合，不做缓存。
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUser) -> Result<User, ApplicationError> {
        let user_id = UserId::parse(query.user_id.as_str())
            .map_err(|_| ApplicationError::not_found("User", query.user_id.as_str()))?;

        let mut users = self.user_repo.find_all().await?;

        users
            .remove(&user_id)
            .ok_or_else(|| ApplicationError::not_found("User", query.user_id))
    }
}
