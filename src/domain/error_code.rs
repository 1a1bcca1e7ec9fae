//! Error Codes - 应用错误码注册表
//!
//! 每个错误种类对应一个稳定的整数码，与展示文案解耦。
//! 文案模板见 `infrastructure::http::response_errors`。

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// 未注册的错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected a registered ErrorCode, got {0}")]
pub struct UnknownErrorCode(pub u32);

/// 定义错误码枚举，同时生成 `ALL` 与 `name()`
///
/// 变体只在这里登记一次，`ALL` 不会漏项。
macro_rules! error_codes {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// 应用错误码
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum ErrorCode {
            $($variant = $code,)+
        }

        impl ErrorCode {
            /// 所有已注册的错误码
            pub const ALL: [ErrorCode; [$($name),+].len()] = [$(ErrorCode::$variant),+];

            /// 符号名
            pub fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $name,)+
                }
            }
        }
    };
}

error_codes! {
    UserNotFound = 1200 => "USER_NOT_FOUND",
    UserAlreadyExists = 1300 => "USER_ALREADY_EXISTS",

    MalformedBody = 75016 => "MALFORMED_BODY",
    MissingBody = 75017 => "MISSING_BODY",
    MissingParameter = 75018 => "MISSING_PARAMETER",
    WrongParameterType = 75019 => "WRONG_PARAMETER_TYPE",
    MethodNotAllowed = 75020 => "METHOD_NOT_ALLOWED",
    PayloadTooLarge = 75021 => "PAYLOAD_TOO_LARGE",
    ContentTypeHeaderError = 76000 => "CONTENT_TYPE_HEADER_ERROR",

    InternalServerError = 92260 => "INTERNAL_SERVER_ERROR",
}

impl ErrorCode {
    /// 整数码
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(UnknownErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 线上格式为字符串形式的整数码
impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
