//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LeadlinkerError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接错误
/// - 4000-4099: 表单错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    DatabaseError = 1006,
    Conflict = 1009,
    InvalidDateFormat = 1012,
    ValidationFailed = 1020,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    TokenInvalid = 2002,

    // 链接错误 3000-3099
    LinkExpired = 3007,

    // 表单错误 4000-4099
    MissingRequiredFields = 4001,
}

impl From<&LeadlinkerError> for ErrorCode {
    fn from(err: &LeadlinkerError) -> Self {
        match err {
            LeadlinkerError::Validation(_) => ErrorCode::ValidationFailed,
            LeadlinkerError::MissingFields(_) => ErrorCode::MissingRequiredFields,
            LeadlinkerError::DateParse(_) => ErrorCode::InvalidDateFormat,
            LeadlinkerError::NotFound(_) => ErrorCode::NotFound,
            LeadlinkerError::Expired(_) => ErrorCode::LinkExpired,
            LeadlinkerError::Conflict(_) => ErrorCode::Conflict,
            LeadlinkerError::Unauthenticated(_) => ErrorCode::Unauthorized,
            LeadlinkerError::Unauthorized(_) => ErrorCode::Forbidden,
            LeadlinkerError::DatabaseConnection(_) | LeadlinkerError::DatabaseOperation(_) => {
                ErrorCode::DatabaseError
            }
            LeadlinkerError::DatabaseConfig(_)
            | LeadlinkerError::FileOperation(_)
            | LeadlinkerError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Conflict).unwrap(), "1009");
        let code: ErrorCode = serde_json::from_str("3007").unwrap();
        assert_eq!(code, ErrorCode::LinkExpired);
    }

    #[test]
    fn test_from_leadlinker_error() {
        assert_eq!(
            ErrorCode::from(&LeadlinkerError::not_found("x")),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from(&LeadlinkerError::database_operation("x")),
            ErrorCode::DatabaseError
        );
        assert_eq!(
            ErrorCode::from(&LeadlinkerError::unauthenticated("x")),
            ErrorCode::Unauthorized
        );
    }
}
