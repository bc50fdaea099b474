use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LeadlinkerError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    /// 缺少必填字段，携带字段 label（按表单顺序）
    MissingFields(Vec<String>),
    NotFound(String),
    Expired(String),
    Conflict(String),
    Unauthenticated(String),
    Unauthorized(String),
    Serialization(String),
    DateParse(String),
}

impl LeadlinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LeadlinkerError::DatabaseConfig(_) => "E001",
            LeadlinkerError::DatabaseConnection(_) => "E002",
            LeadlinkerError::DatabaseOperation(_) => "E003",
            LeadlinkerError::FileOperation(_) => "E004",
            LeadlinkerError::Validation(_) => "E005",
            LeadlinkerError::MissingFields(_) => "E006",
            LeadlinkerError::NotFound(_) => "E007",
            LeadlinkerError::Expired(_) => "E008",
            LeadlinkerError::Conflict(_) => "E009",
            LeadlinkerError::Unauthenticated(_) => "E010",
            LeadlinkerError::Unauthorized(_) => "E011",
            LeadlinkerError::Serialization(_) => "E012",
            LeadlinkerError::DateParse(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LeadlinkerError::DatabaseConfig(_) => "Database Configuration Error",
            LeadlinkerError::DatabaseConnection(_) => "Database Connection Error",
            LeadlinkerError::DatabaseOperation(_) => "Database Operation Error",
            LeadlinkerError::FileOperation(_) => "File Operation Error",
            LeadlinkerError::Validation(_) => "Validation Error",
            LeadlinkerError::MissingFields(_) => "Missing Required Fields",
            LeadlinkerError::NotFound(_) => "Resource Not Found",
            LeadlinkerError::Expired(_) => "Link Expired",
            LeadlinkerError::Conflict(_) => "Conflict",
            LeadlinkerError::Unauthenticated(_) => "Unauthenticated",
            LeadlinkerError::Unauthorized(_) => "Unauthorized",
            LeadlinkerError::Serialization(_) => "Serialization Error",
            LeadlinkerError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LeadlinkerError::DatabaseConfig(msg) => msg,
            LeadlinkerError::DatabaseConnection(msg) => msg,
            LeadlinkerError::DatabaseOperation(msg) => msg,
            LeadlinkerError::FileOperation(msg) => msg,
            LeadlinkerError::Validation(msg) => msg,
            LeadlinkerError::MissingFields(_) => "Missing required fields",
            LeadlinkerError::NotFound(msg) => msg,
            LeadlinkerError::Expired(msg) => msg,
            LeadlinkerError::Conflict(msg) => msg,
            LeadlinkerError::Unauthenticated(msg) => msg,
            LeadlinkerError::Unauthorized(msg) => msg,
            LeadlinkerError::Serialization(msg) => msg,
            LeadlinkerError::DateParse(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LeadlinkerError::Validation(_)
            | LeadlinkerError::MissingFields(_)
            | LeadlinkerError::DateParse(_) => StatusCode::BAD_REQUEST,
            LeadlinkerError::NotFound(_) => StatusCode::NOT_FOUND,
            LeadlinkerError::Expired(_) => StatusCode::GONE,
            LeadlinkerError::Conflict(_) => StatusCode::CONFLICT,
            LeadlinkerError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            LeadlinkerError::Unauthorized(_) => StatusCode::FORBIDDEN,
            LeadlinkerError::DatabaseConfig(_)
            | LeadlinkerError::DatabaseConnection(_)
            | LeadlinkerError::DatabaseOperation(_)
            | LeadlinkerError::FileOperation(_)
            | LeadlinkerError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为存储层错误（旁路写入失败时只记录日志，不向上传播）
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            LeadlinkerError::DatabaseConnection(_) | LeadlinkerError::DatabaseOperation(_)
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        match self {
            LeadlinkerError::MissingFields(labels) => {
                format!("{}: {}", self.error_type(), labels.join(", "))
            }
            _ => format!("{}: {}", self.error_type(), self.message()),
        }
    }
}

impl fmt::Display for LeadlinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LeadlinkerError {}

// 便捷的构造函数
impl LeadlinkerError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Validation(msg.into())
    }

    pub fn missing_fields(labels: Vec<String>) -> Self {
        LeadlinkerError::MissingFields(labels)
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Expired(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Conflict(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Unauthenticated(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        LeadlinkerError::DateParse(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LeadlinkerError {
    fn from(err: sea_orm::DbErr) -> Self {
        LeadlinkerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LeadlinkerError {
    fn from(err: std::io::Error) -> Self {
        LeadlinkerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LeadlinkerError {
    fn from(err: serde_json::Error) -> Self {
        LeadlinkerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LeadlinkerError {
    fn from(err: chrono::ParseError) -> Self {
        LeadlinkerError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LeadlinkerError>;
