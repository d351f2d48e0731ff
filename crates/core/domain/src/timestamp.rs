//! 文档时间戳归一化。
//!
//! 导入的文档中日期字段可能是三种形态：
//! - 毫秒数字：`1704067200000`
//! - 文本：RFC 3339、`YYYY-MM-DDTHH:MM:SS`、`YYYY-MM-DD` 或毫秒数字字符串
//! - 时间戳包装对象：`{"seconds": 1704067200, "nanoseconds": 0}`
//!
//! 无法解析的值返回 `None`，调用方据此将其排除，而不是报错。

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentTimestamp {
    Millis(i64),
    Text(String),
    Wrapper {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
}

impl DocumentTimestamp {
    /// 转换为 UTC 时间。
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DocumentTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            DocumentTimestamp::Text(text) => parse_date_text(text),
            DocumentTimestamp::Wrapper {
                seconds,
                nanoseconds,
            } => Utc.timestamp_opt(*seconds, *nanoseconds).single(),
        }
    }

    /// 转换为存储用文本；文本形态原样保留。
    pub fn into_text(self) -> String {
        match self {
            DocumentTimestamp::Text(text) => text,
            other => match other.to_datetime() {
                Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
                None => match other {
                    DocumentTimestamp::Millis(ms) => ms.to_string(),
                    DocumentTimestamp::Wrapper { seconds, .. } => seconds.to_string(),
                    DocumentTimestamp::Text(text) => text,
                },
            },
        }
    }
}

impl From<&str> for DocumentTimestamp {
    fn from(value: &str) -> Self {
        DocumentTimestamp::Text(value.to_string())
    }
}

/// 解析日期文本。
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
    }
    None
}

/// 当前时间戳（毫秒）。
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date")
    }

    #[test]
    fn all_shapes_normalize_to_same_instant() {
        let shapes: Vec<DocumentTimestamp> = vec![
            serde_json::from_str("1704067200000").expect("millis"),
            serde_json::from_str("\"2024-01-01\"").expect("date"),
            serde_json::from_str("\"2024-01-01T00:00:00Z\"").expect("rfc3339"),
            serde_json::from_str("\"2024-01-01T00:00:00\"").expect("naive"),
            serde_json::from_str("{\"seconds\":1704067200,\"nanoseconds\":0}").expect("wrapper"),
            serde_json::from_str("{\"_seconds\":1704067200,\"_nanoseconds\":0}").expect("legacy"),
        ];
        for shape in shapes {
            assert_eq!(shape.to_datetime(), Some(jan_first()), "{shape:?}");
        }
    }

    #[test]
    fn unparsable_text_is_none() {
        assert_eq!(DocumentTimestamp::from("next tuesday").to_datetime(), None);
        assert_eq!(DocumentTimestamp::from("").to_datetime(), None);
        assert_eq!(DocumentTimestamp::from("2024-13-45").to_datetime(), None);
    }

    #[test]
    fn into_text_keeps_text_and_formats_others() {
        assert_eq!(DocumentTimestamp::from("2024-01-01").into_text(), "2024-01-01");
        assert_eq!(
            DocumentTimestamp::Millis(1_704_067_200_000).into_text(),
            "2024-01-01T00:00:00.000Z"
        );
    }
}
