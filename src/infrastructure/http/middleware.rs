//! HTTP Middleware
//!
//! - 默认响应头：Content-Type 与 CORS 三件套
//! - HTTP 状态码错误日志

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use super::responder::CONTENT_TYPE_JSON;
use super::state::HandlerInitializers;

/// 默认响应头中间件
///
/// 每个响应（包括错误与 204）都会被设置：
/// - `Content-Type: application/json`
/// - `Access-Control-Allow-Origin` / `-Headers` / `-Methods`
pub async fn default_headers_middleware(
    State(initializers): State<Arc<HandlerInitializers>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let access_control = &initializers.access_control;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        access_control.allowed_origin.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        access_control.allowed_headers.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        access_control.allowed_methods.clone(),
    );

    response
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：错误信封的内容在 Responder::write_error 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::AccessControl;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use std::io;
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router(initializers: HandlerInitializers) -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(initializers),
                default_headers_middleware,
            ))
    }

    fn get_request(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// 收集日志输出的 writer
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// 在线程局部 subscriber 下发送请求，返回状态码与日志
    async fn request_with_logs(uri: &str) -> (StatusCode, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = create_test_router(HandlerInitializers::default());
        let response = app.oneshot(get_request(uri)).await.unwrap();
        (response.status(), logs.contents())
    }

    #[tokio::test]
    async fn test_ok_response_is_not_logged() {
        let (status, logs) = request_with_logs("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!logs.contains("HTTP client error"), "{}", logs);
        assert!(!logs.contains("HTTP server error"), "{}", logs);
    }

    #[tokio::test]
    async fn test_client_error_logs_warning() {
        let (status, logs) = request_with_logs("/not-found").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("HTTP client error"), "{}", logs);
        assert!(logs.contains("status=404"), "{}", logs);
        assert!(logs.contains("uri=/not-found"), "{}", logs);
    }

    #[tokio::test]
    async fn test_server_error_logs_error() {
        let (status, logs) = request_with_logs("/error").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logs.contains("ERROR"), "{}", logs);
        assert!(logs.contains("HTTP server error"), "{}", logs);
        assert!(logs.contains("status=500"), "{}", logs);
    }

    #[tokio::test]
    async fn test_default_headers_on_every_response() {
        for uri in ["/ok", "/not-found", "/error", "/missing"] {
            let app = create_test_router(HandlerInitializers::default());
            let response = app.oneshot(get_request(uri)).await.unwrap();
            let headers = response.headers();
            assert_eq!(headers[header::CONTENT_TYPE], CONTENT_TYPE_JSON, "{}", uri);
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{}", uri);
            assert_eq!(
                headers[header::ACCESS_CONTROL_ALLOW_METHODS],
                "GET,POST,PUT,PATCH,DELETE,OPTIONS",
                "{}",
                uri
            );
            assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
                .to_str()
                .unwrap()
                .contains("X-Access-Token"));
        }
    }

    #[tokio::test]
    async fn test_configured_access_control_overrides_defaults() {
        let initializers = HandlerInitializers {
            access_control: AccessControl {
                allowed_origin: HeaderValue::from_static("https://example.com"),
                allowed_headers: HeaderValue::from_static("Content-Type"),
                allowed_methods: HeaderValue::from_static("GET"),
            },
            ..HandlerInitializers::default()
        };
        let app = create_test_router(initializers);
        let response = app.oneshot(get_request("/ok")).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://example.com");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
    }
}
