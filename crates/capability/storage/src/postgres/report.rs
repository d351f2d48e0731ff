//! Postgres 报表快照与导出日志存储实现
//!
//! summary / chart_data / table_data 保存为 JSON 文本；
//! serde_json 开启 preserve_order，表格列顺序在往返后保持不变。

use crate::error::StorageError;
use crate::models::{ExportLogRecord, ReportRecord};
use crate::postgres::{enum_column, json_column};
use crate::traits::{ExportLogStore, ReportStore};
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const REPORT_COLUMNS: &str = "report_id, hotel_id, report_type, date_from, date_to, summary, \
     chart_data, table_data, generated_by, generated_at_ms";

pub struct PgReportStore {
    pub pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_report(row: &PgRow) -> Result<ReportRecord, StorageError> {
    Ok(ReportRecord {
        report_id: row.try_get("report_id")?,
        hotel_id: row.try_get("hotel_id")?,
        report_type: enum_column(row, "report_type")?,
        date_from: row.try_get("date_from")?,
        date_to: row.try_get("date_to")?,
        summary: json_column(row, "summary")?,
        chart_data: json_column(row, "chart_data")?,
        table_data: json_column(row, "table_data")?,
        generated_by: row.try_get("generated_by")?,
        generated_at_ms: row.try_get("generated_at_ms")?,
    })
}

#[async_trait::async_trait]
impl ReportStore for PgReportStore {
    async fn list_reports(&self, ctx: &HotelContext) -> Result<Vec<ReportRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {REPORT_COLUMNS} from reports where hotel_id = $1 order by generated_at_ms desc"
        );
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_report).collect()
    }

    async fn find_report(
        &self,
        ctx: &HotelContext,
        report_id: &str,
    ) -> Result<Option<ReportRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql =
            format!("select {REPORT_COLUMNS} from reports where hotel_id = $1 and report_id = $2");
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_report).transpose()
    }

    async fn save_report(
        &self,
        ctx: &HotelContext,
        record: ReportRecord,
    ) -> Result<ReportRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let summary = serde_json::to_string(&record.summary)?;
        let chart_data = serde_json::to_string(&record.chart_data)?;
        let table_data = serde_json::to_string(&record.table_data)?;
        let sql = format!(
            "insert into reports ({REPORT_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        );
        sqlx::query(&sql)
            .bind(&record.report_id)
            .bind(&record.hotel_id)
            .bind(record.report_type.as_str())
            .bind(&record.date_from)
            .bind(&record.date_to)
            .bind(summary)
            .bind(chart_data)
            .bind(table_data)
            .bind(&record.generated_by)
            .bind(record.generated_at_ms)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }
}

pub struct PgExportLogStore {
    pub pool: PgPool,
}

impl PgExportLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_export_log(row: &PgRow) -> Result<ExportLogRecord, StorageError> {
    let row_count: i64 = row.try_get("row_count")?;
    Ok(ExportLogRecord {
        export_id: row.try_get("export_id")?,
        hotel_id: row.try_get("hotel_id")?,
        report_id: row.try_get("report_id")?,
        report_type: enum_column(row, "report_type")?,
        file_name: row.try_get("file_name")?,
        row_count: usize::try_from(row_count).unwrap_or_default(),
        exported_by: row.try_get("exported_by")?,
        exported_at_ms: row.try_get("exported_at_ms")?,
    })
}

#[async_trait::async_trait]
impl ExportLogStore for PgExportLogStore {
    async fn append_export_log(
        &self,
        ctx: &HotelContext,
        record: ExportLogRecord,
    ) -> Result<ExportLogRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        sqlx::query(
            "insert into export_logs \
             (export_id, hotel_id, report_id, report_type, file_name, row_count, exported_by, exported_at_ms) \
             values ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&record.export_id)
        .bind(&record.hotel_id)
        .bind(&record.report_id)
        .bind(record.report_type.as_str())
        .bind(&record.file_name)
        .bind(i64::try_from(record.row_count).unwrap_or(i64::MAX))
        .bind(&record.exported_by)
        .bind(record.exported_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_export_logs(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<ExportLogRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let rows = sqlx::query(
            "select export_id, hotel_id, report_id, report_type, file_name, row_count, exported_by, exported_at_ms \
             from export_logs where hotel_id = $1 order by exported_at_ms desc",
        )
        .bind(&ctx.hotel_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_export_log).collect()
    }
}
