//! 目标地址校验
//!
//! 只允许 http/https，阻止脚本类协议，并限制长度。

use url::Url;

/// 目标地址最大长度
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    TooLong(usize),
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Destination URL cannot be empty"),
            Self::TooLong(len) => write!(
                f,
                "Destination URL is {} characters, the limit is {}",
                len, MAX_URL_LENGTH
            ),
            Self::InvalidProtocol(scheme) => write!(
                f,
                "Unsupported scheme '{}', destination must use http or https",
                scheme
            ),
            Self::DangerousProtocol(scheme) => write!(f, "Scheme '{}' is not allowed", scheme),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const BLOCKED_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

/// 校验目标地址，返回去除首尾空白后的地址
pub fn validate_url(raw: &str) -> Result<String, UrlValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }
    let len = url.chars().count();
    if len > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(len));
    }

    let scheme = url
        .split_once(':')
        .map(|(s, _)| s.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if BLOCKED_SCHEMES.contains(&scheme.as_str()) {
        return Err(UrlValidationError::DangerousProtocol(scheme));
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::InvalidProtocol(other.to_string())),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(url.to_string())
}
