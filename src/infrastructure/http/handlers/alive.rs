//! Alive Handler
//!
//! 存活检查：`GET {base}/` -> `{"status": "Alive"}`

use axum::{extract::State, http::StatusCode, response::Response};
use std::sync::Arc;

use crate::infrastructure::http::dto::AliveResponse;
use crate::infrastructure::http::state::AppState;

/// 存活检查
pub async fn alive(State(state): State<Arc<AppState>>) -> Response {
    state
        .responder
        .send_response(Some(&AliveResponse::alive()), StatusCode::OK)
}
