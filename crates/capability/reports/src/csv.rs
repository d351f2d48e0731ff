//! 表格数据转 CSV。
//!
//! 表头取第一行的字段顺序；每个单元格都用双引号包裹，内部双引号加倍，
//! 行之间以 `\n` 连接。空表返回空字符串。

use chrono::NaiveDate;
use domain::ReportType;
use hms_storage::TableRow;
use serde_json::Value;

pub fn to_csv(rows: &[TableRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| quote(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = headers
            .iter()
            .map(|header| quote(&cell_text(row.get(header.as_str()))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// `report_<type>_<YYYY-MM-DD>.csv`
pub fn export_file_name(report_type: ReportType, date: NaiveDate) -> String {
    format!("report_{}_{}.csv", report_type.as_str(), date.format("%Y-%m-%d"))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
