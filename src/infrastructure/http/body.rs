//! Request Body Envelope
//!
//! POST/PUT/PATCH 请求体预处理，在 handler 业务逻辑之前执行。
//!
//! 校验顺序：
//! 1. 非 POST/PUT/PATCH：不处理
//! 2. Content-Type 必须以 `application/json` 开头
//! 3. PUT/PATCH 不允许作用于嵌套资源（如 `/users/{user_id}/roles/{role_id}`）
//! 4. 请求体不能为空
//! 5. 请求体必须是合法 JSON
//!
//! 读取请求体超出大小限制时返回 413。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{header, Method, StatusCode},
};
use serde_json::Value;

use crate::domain::ErrorCode;

use super::error::ApiError;
use super::responder::{Responder, CONTENT_TYPE_JSON};
use super::state::AppState;

/// 嵌套资源的父级路径参数
pub const NESTED_PARENT_KEYS: &[&str] = &["user_id", "token_id", "role_id"];

/// 嵌套资源的子级路径参数
pub const NESTED_CHILD_KEYS: &[&str] = &["role_id", "permission_id"];

/// 预处理拒绝原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRejection {
    pub code: ErrorCode,
    pub params: Vec<(&'static str, String)>,
}

impl BodyRejection {
    fn new(code: ErrorCode) -> Self {
        Self {
            code,
            params: Vec::new(),
        }
    }

    fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// 通过 Responder 生成错误信封
    pub fn into_api_error(self, responder: &Responder) -> ApiError {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        responder.produce_error(self.code, &params)
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// 路径参数是否表示嵌套资源
pub fn is_nested_resource(path_keys: &[&str]) -> bool {
    match path_keys {
        [parent, child, ..] => NESTED_PARENT_KEYS.contains(parent) && NESTED_CHILD_KEYS.contains(child),
        _ => false,
    }
}

/// 请求体预处理
///
/// - `Ok(None)`: 非写方法，未处理请求体
/// - `Ok(Some(value))`: 解析后的请求体
/// - `Err(rejection)`: 终止请求，由调用方输出错误信封
pub fn prepare_body(
    method: &Method,
    content_type: Option<&str>,
    path_keys: &[&str],
    body: &[u8],
) -> Result<Option<Value>, BodyRejection> {
    if !is_mutating(method) {
        return Ok(None);
    }

    if !content_type.unwrap_or_default().starts_with(CONTENT_TYPE_JSON) {
        return Err(BodyRejection::new(ErrorCode::ContentTypeHeaderError));
    }

    // 单层与嵌套资源共用同一个 handler，PUT/PATCH 只对单层资源开放
    if (*method == Method::PUT || *method == Method::PATCH) && is_nested_resource(path_keys) {
        return Err(
            BodyRejection::new(ErrorCode::MethodNotAllowed).with_param("method", method.as_str())
        );
    }

    if body.is_empty() {
        return Err(BodyRejection::new(ErrorCode::MissingBody));
    }

    match serde_json::from_slice(body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode request body");
            Err(BodyRejection::new(ErrorCode::MalformedBody).with_param("reason", e.to_string()))
        }
    }
}

/// 已校验的 JSON 请求体提取器
///
/// 写方法的 handler 以此作为最后一个参数；校验失败时 handler 不会被调用。
#[derive(Debug, Clone)]
pub struct JsonEnvelope(pub Option<Value>);

#[async_trait]
impl FromRequest<Arc<AppState>> for JsonEnvelope {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let path_params = RawPathParams::from_request_parts(&mut parts, state)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read path parameters");
                state.responder.internal_server_error()
            })?;
        let path_keys: Vec<&str> = path_params.iter().map(|(key, _)| key).collect();

        let method = parts.method.clone();
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    tracing::warn!(error = %e, "Request body exceeds the size limit");
                    return state.responder.produce_error(ErrorCode::PayloadTooLarge, &[]);
                }
                tracing::error!(error = %e, "Failed to read request body");
                state.responder.internal_server_error()
            })?;

        prepare_body(&method, content_type.as_deref(), &path_keys, &bytes)
            .map(JsonEnvelope)
            .map_err(|rejection| rejection.into_api_error(&state.responder))
    }
}
