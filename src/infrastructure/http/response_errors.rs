//! Response Errors - 错误响应目录
//!
//! 每个 `ErrorCode` 对应一个固定模板：HTTP 状态码、标题、带命名占位符的详情。
//! 模板表是对 `ErrorCode` 的穷尽 `match`，新增错误码而不补模板将无法编译。

use serde::Serialize;
use thiserror::Error;

use crate::domain::ErrorCode;

/// 错误响应体
///
/// 线上格式: `{"status": 404, "code": "1200", "title": "...", "detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseError {
    pub status: u16,
    pub code: ErrorCode,
    pub title: &'static str,
    pub detail: String,
}

/// 错误模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub status: u16,
    pub title: &'static str,
    pub detail: &'static str,
}

/// 模板插值错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Missing template parameter: {0}")]
    MissingParameter(String),

    #[error("Unterminated placeholder in template: {0}")]
    UnterminatedPlaceholder(String),
}

/// 错误码 -> 模板
pub const fn template(code: ErrorCode) -> Template {
    match code {
        ErrorCode::UserNotFound => Template {
            status: 404,
            title: "User Not Found",
            detail: "The user {user} was not found.",
        },
        ErrorCode::UserAlreadyExists => Template {
            status: 409,
            title: "User Already Exists",
            detail: "The user {user} already exists, cannot create one.",
        },
        ErrorCode::MalformedBody => Template {
            status: 400,
            title: "Malformed Body",
            detail: "The body could not be decoded as JSON: {reason}.",
        },
        ErrorCode::MissingBody => Template {
            status: 422,
            title: "Missing Body",
            detail: "The body is missing but required for this request.",
        },
        ErrorCode::MissingParameter => Template {
            status: 422,
            title: "Missing Parameter",
            detail: "The parameter {parameter} is missing.",
        },
        ErrorCode::WrongParameterType => Template {
            status: 422,
            title: "Wrong Parameter Type",
            detail: "The parameter {parameter} must be a {type}.",
        },
        ErrorCode::MethodNotAllowed => Template {
            status: 405,
            title: "Method Not Allowed",
            detail: "The method {method} is not allowed for this request.",
        },
        ErrorCode::PayloadTooLarge => Template {
            status: 413,
            title: "Payload Too Large",
            detail: "The body exceeds the maximum accepted size.",
        },
        ErrorCode::ContentTypeHeaderError => Template {
            status: 400,
            title: "Content-Type Header Error",
            detail: "The Content-Type header is missing or invalid, only 'Content-Type: application/json*' headers are accepted.",
        },
        ErrorCode::InternalServerError => Template {
            status: 500,
            title: "Internal Server Error",
            detail: "We are working to resolve this issue. If the error persists, please contact {contact}.",
        },
    }
}

/// 模板中出现的占位符名称（按出现顺序）
pub fn required_params(code: ErrorCode) -> Vec<&'static str> {
    let mut names = Vec::new();
    let mut rest = template(code).detail;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// 用命名参数替换模板中的 `{name}` 占位符
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut detail = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        detail.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| TemplateError::UnterminatedPlaceholder(template.to_string()))?;
        let name = &after[..end];
        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| TemplateError::MissingParameter(name.to_string()))?;
        detail.push_str(value);
        rest = &after[end + 1..];
    }
    detail.push_str(rest);

    Ok(detail)
}

/// 错误响应目录
///
/// 持有兜底 500 响应所需的联系方式。
#[derive(Debug, Clone)]
pub struct ResponseErrors {
    contact: String,
}

impl ResponseErrors {
    pub fn new(contact: impl Into<String>) -> Self {
        Self {
            contact: contact.into(),
        }
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// 生成错误响应
    ///
    /// 参数缺失时退化为 INTERNAL_SERVER_ERROR，不会向调用方抛错。
    pub fn response_for(&self, code: ErrorCode, params: &[(&str, &str)]) -> ResponseError {
        let entry = template(code);
        match interpolate(entry.detail, params) {
            Ok(detail) => ResponseError {
                status: entry.status,
                code,
                title: entry.title,
                detail,
            },
            Err(e) => {
                tracing::error!(code = %code, error = %e, "Failed to build error response");
                self.internal_server_error()
            }
        }
    }

    /// 通用 500 响应
    pub fn internal_server_error(&self) -> ResponseError {
        let entry = template(ErrorCode::InternalServerError);
        ResponseError {
            status: entry.status,
            code: ErrorCode::InternalServerError,
            title: entry.title,
            detail: entry.detail.replace("{contact}", &self.contact),
        }
    }

    /// 启动自检：每个错误码都能生成码值一致、无残留占位符的响应
    pub fn self_check(&self) -> Result<(), String> {
        for code in ErrorCode::ALL {
            let names = required_params(code);
            let params: Vec<(&str, &str)> = names.iter().map(|name| (*name, "x")).collect();
            let response = self.response_for(code, &params);
            if response.code != code {
                return Err(format!("{} ({}) has no usable template", code.name(), code));
            }
            if response.detail.contains('{') || response.detail.contains('}') {
                return Err(format!("{} ({}) leaves a placeholder unresolved", code.name(), code));
            }
        }
        Ok(())
    }
}
