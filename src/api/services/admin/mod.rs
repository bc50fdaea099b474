//! Admin API 服务模块
//!
//! 当前用户（`OwnerId`）名下的链接、表单与统计端点。

pub mod error_code;
mod form_crud;
mod helpers;
mod link_crud;
pub mod routes;
mod stats;
mod types;

pub use types::*;

pub use helpers::{api_result, error_from_leadlinker, error_response, success_response};

pub use error_code::ErrorCode;
