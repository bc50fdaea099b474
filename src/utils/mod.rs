pub mod ip;
pub mod time_parser;
pub mod url_validator;

/// 短码允许的最小长度
pub const MIN_CODE_LENGTH: usize = 4;
/// 短码允许的最大长度
pub const MAX_CODE_LENGTH: usize = 20;

/// 不可作为短码使用的保留词（与公共路由冲突）
const RESERVED_CODES: &[&str] = &["api", "health", "submit"];

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// 短码格式：4-20 位 `[A-Za-z0-9_-]`
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// 是否为保留短码
///
/// 除内置保留词外，配置的路由前缀（去掉首个 `/`）同样保留。
pub fn is_reserved_code(code: &str, route_prefixes: &[&str]) -> bool {
    let lower = code.to_ascii_lowercase();
    RESERVED_CODES.contains(&lower.as_str())
        || route_prefixes
            .iter()
            .map(|p| p.trim_matches('/').to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .any(|p| p == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..50 {
            let code = generate_random_code(6);
            assert_eq!(code.len(), 6);
            assert!(is_valid_short_code(&code));
        }
    }

    #[test]
    fn test_short_code_format() {
        assert!(is_valid_short_code("abcd"));
        assert!(is_valid_short_code("promo_2024-q1"));
        assert!(is_valid_short_code(&"a".repeat(20)));
        assert!(!is_valid_short_code("abc"));
        assert!(!is_valid_short_code(&"a".repeat(21)));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("dots.not.ok"));
        assert!(!is_valid_short_code("ünï"));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_code("api", &[]));
        assert!(is_reserved_code("Health", &[]));
        assert!(is_reserved_code("submit", &[]));
        assert!(is_reserved_code("admin", &["/admin"]));
        assert!(!is_reserved_code("promo", &["/api", "/health"]));
    }
}
