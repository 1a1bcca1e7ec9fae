//! User Queries

/// 获取用户详情查询
///
/// `user_id` 保留路由中的原始值，校验在 handler 中完成，
/// 以便 404 详情中能原样回显。
#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: String,
}
