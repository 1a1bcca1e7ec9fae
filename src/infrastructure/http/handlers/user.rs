//! User HTTP Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    response::Response,
};
use std::sync::Arc;

use crate::application::GetUser;
use crate::domain::ErrorCode;
use crate::infrastructure::http::dto::UserResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取用户
///
/// - 200 OK: `{"user": {...}}`
/// - 404 Not Found: 用户不存在，或路径参数无法解码
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(user_id) = user_id.map_err(|e| {
        // 无法解码的 ID 不可能命中任何用户，按原始路径段报告
        let raw = uri.path().rsplit('/').next().unwrap_or_default();
        tracing::warn!(error = %e, user_id = raw, "Undecodable user id");
        state
            .responder
            .produce_error(ErrorCode::UserNotFound, &[("user", raw)])
    })?;

    let user = state
        .get_user_handler
        .handle(GetUser { user_id })
        .await
        .map_err(|e| ApiError::from_application(&state.responder, e))?;

    tracing::debug!(user_id = %user.id(), "User fetched");

    Ok(state
        .responder
        .send_response(Some(&UserResponse { user }), StatusCode::OK))
}
