//! Admin API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::errors::LeadlinkerError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LeadlinkerError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 5xx 不向调用方暴露内部细节。
pub fn error_from_leadlinker(err: &LeadlinkerError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err);
    if status.is_server_error() {
        error!("Admin API: {}", err);
        return error_response(status, error_code, "Internal server error");
    }
    match err {
        LeadlinkerError::MissingFields(labels) => json_response(
            status,
            error_code,
            err.message(),
            Some(serde_json::json!({ "missingFields": labels })),
        ),
        _ => error_response(status, error_code, err.message()),
    }
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 LeadlinkerError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<LeadlinkerError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: LeadlinkerError = e.into();
            error_from_leadlinker(&err)
        }
    }
}

/// 创建类请求：201 Created
pub fn created_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data)),
        Err(e) => error_from_leadlinker(&e),
    }
}
