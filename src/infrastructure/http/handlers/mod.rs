//! HTTP Handlers

mod alive;
mod common;
mod user;

pub use alive::*;
pub use common::*;
pub use user::*;
