//! 预订号、申请单号与邮箱格式。

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

static BOOKING_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    // 固定模式，编译失败只可能是代码错误
    Regex::new(r"^BK[A-Za-z0-9]{10,}$").unwrap_or_else(|err| panic!("booking pattern: {err}"))
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|err| panic!("email pattern: {err}"))
});

const LOWER_ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const UPPER_ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 预订号格式：`BK` + 至少 10 位字母数字。
pub fn is_valid_booking_reference(value: &str) -> bool {
    BOOKING_REFERENCE.is_match(value)
}

/// 邮箱只校验形状，忽略首尾空白。
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// 生成预订号：`BK<毫秒时间戳><9 位小写字母数字>`。
pub fn generate_booking_reference(now_ms: i64) -> String {
    format!("BK{}{}", now_ms, random_suffix(LOWER_ALNUM, 9))
}

/// 生成联系申请单号：`REQ-<毫秒时间戳>-<6 位大写字母数字>`。
pub fn generate_request_reference(now_ms: i64) -> String {
    format!("REQ-{}-{}", now_ms, random_suffix(UPPER_ALNUM, 6))
}

fn random_suffix(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_style_reference() {
        assert!(is_valid_booking_reference("BK1761629662783i7bw7dtsz"));
        assert!(is_valid_booking_reference("BK0123456789"));
    }

    #[test]
    fn rejects_malformed_reference() {
        assert!(!is_valid_booking_reference("XYZ123"));
        assert!(!is_valid_booking_reference("BK123"));
        assert!(!is_valid_booking_reference("bk1761629662783"));
        assert!(!is_valid_booking_reference("BK1761629662-783"));
        assert!(!is_valid_booking_reference(""));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("grace@example.com"));
        assert!(is_valid_email(" ops@hotel.example.com "));
        assert!(!is_valid_email("grace@example"));
        assert!(!is_valid_email("grace example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn generated_references_have_expected_shape() {
        let booking = generate_booking_reference(1_761_629_662_783);
        assert!(booking.starts_with("BK1761629662783"));
        assert_eq!(booking.len(), 2 + 13 + 9);
        assert!(is_valid_booking_reference(&booking));

        let request = generate_request_reference(1_761_629_662_783);
        let parts: Vec<&str> = request.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "REQ");
        assert_eq!(parts[1], "1761629662783");
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].bytes().all(|b| UPPER_ALNUM.contains(&b)));
    }
}
