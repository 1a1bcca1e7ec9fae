//! Responder - 统一响应生成
//!
//! 所有 handler 通过 Responder 输出成功或错误响应：
//! - `send_response`: JSON 成功响应（空数据只返回状态码）
//! - `write_error` / `produce_error`: 统一错误信封
//! - `options`: CORS 预检 204

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::Span;

use crate::domain::ErrorCode;

use super::error::{ApiError, ErrorCodeMismatch};
use super::response_errors::{ResponseError, ResponseErrors};
use super::state::HandlerInitializers;

/// JSON 内容类型
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 统一响应生成器
#[derive(Debug, Clone)]
pub struct Responder {
    catalog: Arc<ResponseErrors>,
    logger: Span,
}

impl Responder {
    pub fn new(initializers: &HandlerInitializers) -> Self {
        Self {
            catalog: Arc::new(ResponseErrors::new(initializers.contact.clone())),
            logger: initializers.logger.clone(),
        }
    }

    pub fn catalog(&self) -> &ResponseErrors {
        &self.catalog
    }

    /// 发送成功响应
    ///
    /// 数据为空（None / null / false / 0 / "" / [] / {}）时只返回状态码；
    /// 序列化失败记录日志并转为 500。
    pub fn send_response<T>(&self, data: Option<&T>, status: StatusCode) -> Response
    where
        T: Serialize + ?Sized,
    {
        let _entered = self.logger.enter();

        let value = match data.map(serde_json::to_value).transpose() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                return self.internal_server_error().into_response();
            }
        };

        let value = match value {
            Some(value) if !is_empty(&value) => value,
            _ => return status.into_response(),
        };

        match serde_json::to_vec(&value) {
            Ok(body) => (status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode response");
                self.internal_server_error().into_response()
            }
        }
    }

    /// 输出错误响应
    pub fn write_error(&self, status: StatusCode, data: Option<&ResponseError>) -> Response {
        if let Some(error) = data {
            let _entered = self.logger.enter();
            tracing::error!("{} - {} - {}", error.status, error.code, error.title);
        }
        self.send_response(data, status)
    }

    /// 由错误码生成错误
    pub fn produce_error(&self, code: ErrorCode, params: &[(&str, &str)]) -> ApiError {
        let _entered = self.logger.enter();
        let error = self.catalog.response_for(code, params);
        tracing::error!(
            status = error.status,
            code = %error.code,
            detail = %error.detail,
            "{}",
            error.title
        );
        ApiError::new(error, self.clone())
    }

    /// 由原始整数码生成错误
    ///
    /// 未注册的错误码属于调用方违约：返回 `Err`，其中携带 500 响应。
    pub fn produce_error_code(
        &self,
        code: u32,
        params: &[(&str, &str)],
    ) -> Result<ApiError, ErrorCodeMismatch> {
        match ErrorCode::try_from(code) {
            Ok(code) => Ok(self.produce_error(code, params)),
            Err(e) => {
                {
                    let _entered = self.logger.enter();
                    tracing::error!(error = %e, "Refusing to produce an error from an unregistered code");
                }
                Err(ErrorCodeMismatch::new(e, self.internal_server_error()))
            }
        }
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed_error(&self, method: &Method) -> ApiError {
        self.produce_error(ErrorCode::MethodNotAllowed, &[("method", method.as_str())])
    }

    /// 500 Internal Server Error
    pub fn internal_server_error(&self) -> ApiError {
        let contact = self.catalog.contact().to_string();
        self.produce_error(ErrorCode::InternalServerError, &[("contact", contact.as_str())])
    }

    /// CORS 预检：204 无响应体
    pub fn options(&self) -> Response {
        self.send_response::<Value>(None, StatusCode::NO_CONTENT)
    }
}

/// 空数据判定
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
