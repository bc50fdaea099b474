//! 过期时间解析
//!
//! 接受 RFC 3339 时间戳，或相对当前时间的时长，如 `7d`、`1d2h30m`。

use chrono::{DateTime, Duration, Utc};

use crate::errors::{LeadlinkerError, Result};

/// 解析过期时间
pub fn parse_expiry(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let span = parse_duration(input)?;
    Utc::now()
        .checked_add_signed(span)
        .ok_or_else(|| LeadlinkerError::date_parse(format!("Expiry '{}' is out of range", input)))
}

/// 解析相对时长，单位：s/m/h/d/w/M/y（月按 30 天、年按 365 天计）
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || LeadlinkerError::date_parse(format!("Invalid expiry format: '{}'", input));

    let mut total = Duration::zero();
    let mut rest = input;

    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(invalid());
        }
        let amount: i64 = rest[..digits_end].parse().map_err(|_| invalid())?;
        rest = &rest[digits_end..];

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let step = match unit {
            "s" | "sec" | "secs" => Duration::try_seconds(amount),
            "m" | "min" | "mins" => Duration::try_minutes(amount),
            "h" | "hour" | "hours" => Duration::try_hours(amount),
            "d" | "day" | "days" => Duration::try_days(amount),
            "w" | "week" | "weeks" => Duration::try_weeks(amount),
            "M" | "month" | "months" => amount.checked_mul(30).and_then(Duration::try_days),
            "y" | "year" | "years" => amount.checked_mul(365).and_then(Duration::try_days),
            "" => {
                return Err(LeadlinkerError::date_parse(format!(
                    "Missing time unit after '{}' in '{}'",
                    amount, input
                )));
            }
            other => {
                return Err(LeadlinkerError::date_parse(format!(
                    "Unsupported time unit '{}' in '{}'",
                    other, input
                )));
            }
        };
        total = step
            .and_then(|s| total.checked_add(&s))
            .ok_or_else(invalid)?;
    }

    if total <= Duration::zero() {
        return Err(LeadlinkerError::date_parse(
            "Expiry duration must be greater than zero",
        ));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_expiry() {
        let now = Utc::now();
        let at = parse_expiry("1d").unwrap();
        let secs = (at - now).num_seconds();
        assert!((86_390..=86_410).contains(&secs));

        let span = parse_duration("1d2h30m").unwrap();
        assert_eq!(span.num_seconds(), 86_400 + 2 * 3_600 + 30 * 60);

        assert_eq!(parse_duration("2w").unwrap().num_days(), 14);
        assert_eq!(parse_duration("1M").unwrap().num_days(), 30);
        assert_eq!(parse_duration("1y").unwrap().num_days(), 365);
    }

    #[test]
    fn test_rfc3339_expiry() {
        let at = parse_expiry("2030-01-01T00:00:00Z").unwrap();
        assert_eq!(at.to_rfc3339(), "2030-01-01T00:00:00+00:00");
        assert!(parse_expiry("2030-01-01T08:00:00+08:00").is_ok());
    }

    #[test]
    fn test_invalid_expiry() {
        for input in ["", "abc", "1x", "10", "d1", "0d"] {
            let err = parse_expiry(input).unwrap_err();
            assert!(matches!(err, LeadlinkerError::DateParse(_)), "{}", input);
        }
    }
}
