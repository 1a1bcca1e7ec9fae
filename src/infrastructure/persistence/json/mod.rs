//! JSON 文件数据源

mod user_repo;

pub use user_repo::JsonUserRepository;
