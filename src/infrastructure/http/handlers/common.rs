//! Common Handlers
//!
//! 所有路由共用：CORS 预检、未实现方法、未匹配路径

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// CORS 预检：204 无响应体
pub async fn preflight(State(state): State<Arc<AppState>>) -> Response {
    state.responder.options()
}

/// 路由存在但方法未实现：405 错误信封
pub async fn method_not_allowed(State(state): State<Arc<AppState>>, method: Method) -> ApiError {
    state.responder.method_not_allowed_error(&method)
}

/// 未匹配的路径：OPTIONS 返回 204，其余 404 无响应体
pub async fn unmatched(State(state): State<Arc<AppState>>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return state.responder.options();
    }
    StatusCode::NOT_FOUND.into_response()
}
