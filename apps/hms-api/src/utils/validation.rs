//! 输入验证辅助函数
//!
//! 失败时直接返回 400 响应，handler 用 `match` 提前返回。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::{DomainError, is_valid_email};
use std::str::FromStr;

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => normalize_required(value, field).map(Some),
        None => Ok(None),
    }
}

/// 可选文本：空白视为未填写。
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 解析状态等枚举文本。
pub fn parse_enum<T>(value: &str, field: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| bad_request_error(format!("{field}: {err}")))
}

pub fn parse_optional_enum<T>(value: Option<&str>, field: &str) -> Result<Option<T>, Response>
where
    T: FromStr<Err = DomainError>,
{
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_enum(value, field).map(Some),
        None => Ok(None),
    }
}

/// 金额、单价等不可为负。
pub fn ensure_non_negative(value: f64, field: &str) -> Result<f64, Response> {
    if !value.is_finite() || value < 0.0 {
        return Err(bad_request_error(format!("{field} must be a non-negative number")));
    }
    Ok(value)
}

/// 必填邮箱：去除空格并校验格式。
pub fn normalize_email(value: String, field: &str) -> Result<String, Response> {
    let email = normalize_required(value, field)?;
    if !is_valid_email(&email) {
        return Err(bad_request_error(format!("{field} is not a valid address")));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use domain::{BookingStatus, RoomStatus};

    #[test]
    fn email_is_trimmed_and_checked() {
        assert_eq!(
            normalize_email(" ops@hotel.example.com ".to_string(), "email").expect("ok"),
            "ops@hotel.example.com"
        );
        let response = normalize_email("ops@hotel".to_string(), "email").expect_err("shape");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = normalize_email("  ".to_string(), "email").expect_err("blank");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn required_trims() {
        assert_eq!(normalize_required("  101 ".to_string(), "roomNumber").expect("ok"), "101");
        let response = normalize_required("   ".to_string(), "roomNumber").expect_err("blank");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn optional_enum_skips_blank() {
        let status: Option<BookingStatus> = parse_optional_enum(Some("  "), "status").expect("ok");
        assert_eq!(status, None);
        let status: Option<RoomStatus> = parse_optional_enum(Some("cleaning"), "status").expect("ok");
        assert_eq!(status, Some(RoomStatus::Cleaning));
        let response = parse_enum::<RoomStatus>("haunted", "status").expect_err("unknown");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn negative_amounts_rejected() {
        assert!(ensure_non_negative(0.0, "amount").is_ok());
        assert!(ensure_non_negative(-1.0, "amount").is_err());
        assert!(ensure_non_negative(f64::NAN, "amount").is_err());
    }
}
