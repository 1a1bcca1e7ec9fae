//! HTTP Routes
//!
//! API Endpoints（`{base}` 为配置的 `api.base_url`）:
//! - {base}/                GET      存活检查
//! - {base}/users/:user_id  GET      获取用户
//!
//! 每个路由：OPTIONS 返回 204，未实现的方法返回 405 错误信封。
//! 未匹配的路径：OPTIONS 返回 204，其余返回 404。

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
///
/// 路由前缀在构建时绑定，而不是在请求时计算。
pub fn create_routes(base_url: &str) -> Router<Arc<AppState>> {
    let mut router = Router::new()
        .route(&format!("{}/", base_url), main_routes())
        .route(&format!("{}/users/:user_id", base_url), user_routes());

    // `{base}` 与 `{base}/` 都指向存活检查
    if !base_url.is_empty() {
        router = router.route(base_url, main_routes());
    }

    router.fallback(handlers::unmatched)
}

/// 资源路由：补齐 OPTIONS 与 405 兜底
fn resource(method_router: MethodRouter<Arc<AppState>>) -> MethodRouter<Arc<AppState>> {
    method_router
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed)
}

/// Main 路由
fn main_routes() -> MethodRouter<Arc<AppState>> {
    resource(get(handlers::alive))
}

/// User 路由
fn user_routes() -> MethodRouter<Arc<AppState>> {
    resource(get(handlers::get_user))
}
