use domain::ReportType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 报表生成请求体（日期为 `YYYY-MM-DD`）。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub report_type: String,
    pub date_from: String,
    pub date_to: String,
}

/// 图表数据点。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPointDto {
    pub label: String,
    pub value: f64,
}

/// 报表返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub report_id: String,
    pub hotel_id: String,
    pub report_type: ReportType,
    pub date_from: String,
    pub date_to: String,
    pub summary: BTreeMap<String, f64>,
    pub chart_data: Vec<ChartPointDto>,
    pub table_data: Vec<serde_json::Map<String, serde_json::Value>>,
    pub generated_by: String,
    pub generated_at_ms: i64,
}

/// 导出日志返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogDto {
    pub export_id: String,
    pub report_id: String,
    pub report_type: ReportType,
    pub file_name: String,
    pub row_count: usize,
    pub exported_by: String,
    pub exported_at_ms: i64,
}
