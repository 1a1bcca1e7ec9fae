//! HTTP Error Handling
//!
//! 所有错误最终都输出为统一的 JSON 错误信封，不会把故障泄露到传输层。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{ErrorCode, UnknownErrorCode};

use super::responder::Responder;
use super::response_errors::ResponseError;

/// API 错误
///
/// 携带已解析的错误信封，以及用于输出的 Responder。
#[derive(Debug)]
pub struct ApiError {
    error: ResponseError,
    responder: Responder,
}

impl ApiError {
    pub(crate) fn new(error: ResponseError, responder: Responder) -> Self {
        Self { error, responder }
    }

    pub fn error(&self) -> &ResponseError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 将应用层错误映射为错误信封
    pub fn from_application(responder: &Responder, err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotFound { id, .. } => {
                responder.produce_error(ErrorCode::UserNotFound, &[("user", id.as_str())])
            }
            ApplicationError::RepositoryError(msg) => {
                tracing::error!(error = %msg, "Query failed");
                responder.internal_server_error()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.responder.write_error(status, Some(&self.error))
    }
}

/// 使用未注册错误码生成错误
///
/// 调用方违约；仍然携带一个 500 响应，保证客户端拿到合法信封。
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ErrorCodeMismatch {
    #[source]
    source: UnknownErrorCode,
    response: ApiError,
}

impl ErrorCodeMismatch {
    pub(crate) fn new(source: UnknownErrorCode, response: ApiError) -> Self {
        Self { source, response }
    }

    /// 违约的原始错误码
    pub fn code(&self) -> u32 {
        self.source.0
    }
}

impl IntoResponse for ErrorCodeMismatch {
    fn into_response(self) -> Response {
        self.response.into_response()
    }
}

impl From<ErrorCodeMismatch> for ApiError {
    fn from(mismatch: ErrorCodeMismatch) -> Self {
        mismatch.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::HandlerInitializers;

    fn responder() -> Responder {
        Responder::new(&HandlerInitializers::default())
    }

    #[test]
    fn test_not_found_maps_to_user_not_found() {
        let error = ApiError::from_application(
            &responder(),
            ApplicationError::not_found("User", "42"),
        );
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.error().code, ErrorCode::UserNotFound);
        assert!(error.error().detail.contains("42"));
    }

    #[test]
    fn test_repository_error_maps_to_internal() {
        let error = ApiError::from_application(
            &responder(),
            ApplicationError::RepositoryError("IO error: gone".to_string()),
        );
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error().code, ErrorCode::InternalServerError);
        assert!(!error.error().detail.contains("gone"));
    }

    #[test]
    fn test_mismatch_converts_to_internal_error() {
        let mismatch = responder().produce_error_code(7, &[]).unwrap_err();
        assert_eq!(mismatch.to_string(), "Expected a registered ErrorCode, got 7");
        let error = ApiError::from(mismatch);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
