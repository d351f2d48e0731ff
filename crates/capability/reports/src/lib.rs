//! 报表能力：按类型与日期区间从存储数据生成报表快照，导出 CSV 并记录导出日志。

mod builder;
mod csv;

pub use builder::{Period, ReportBody};
pub use csv::{export_file_name, to_csv};

use chrono::{NaiveDate, Utc};
use domain::timestamp::now_ms;
use domain::{HotelContext, ReportType};
use hms_storage::{
    BookingFilter, BookingStore, ExportLogRecord, ExportLogStore, InventoryStore, PaymentFilter,
    PaymentStore, ReportRecord, ReportStore, RoomStore, StaffStore, StorageError,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 报表相关错误。
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid date range: {0}")]
    InvalidPeriod(String),
    #[error("report not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 报表所需的存储集合。
#[derive(Clone)]
pub struct ReportSources {
    pub bookings: Arc<dyn BookingStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub staff: Arc<dyn StaffStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub reports: Arc<dyn ReportStore>,
    pub export_logs: Arc<dyn ExportLogStore>,
}

/// 一次导出的结果。
#[derive(Debug, Clone)]
pub struct ReportExport {
    pub file_name: String,
    pub content: String,
    pub log: ExportLogRecord,
}

pub struct ReportService {
    sources: ReportSources,
}

impl ReportService {
    pub fn new(sources: ReportSources) -> Self {
        Self { sources }
    }

    /// 生成并保存报表快照。日期格式为 `YYYY-MM-DD`。
    pub async fn generate(
        &self,
        ctx: &HotelContext,
        report_type: ReportType,
        date_from: &str,
        date_to: &str,
        generated_by: &str,
    ) -> Result<ReportRecord, ReportError> {
        let period = parse_period(date_from, date_to)?;
        let body = match report_type {
            ReportType::Occupancy => {
                let rooms = self.sources.rooms.list_rooms(ctx).await?;
                let bookings = self.all_bookings(ctx).await?;
                builder::occupancy(&rooms, &bookings, &period)
            }
            ReportType::Revenue => {
                let bookings = self.all_bookings(ctx).await?;
                builder::revenue(&bookings, &period)
            }
            ReportType::Inventory => {
                let items = self.sources.inventory.list_items(ctx).await?;
                builder::inventory(&items)
            }
            ReportType::Staff => {
                let staff = self.sources.staff.list_staff(ctx).await?;
                builder::staff(&staff)
            }
            ReportType::Payments => {
                let payments = self
                    .sources
                    .payments
                    .list_payments(ctx, &PaymentFilter::default())
                    .await?;
                builder::payments(&payments, &period)
            }
        };

        let record = ReportRecord {
            report_id: format!("report-{}", Uuid::new_v4()),
            hotel_id: ctx.hotel_id.clone(),
            report_type,
            date_from: period.from.format("%Y-%m-%d").to_string(),
            date_to: period.to.format("%Y-%m-%d").to_string(),
            summary: body.summary,
            chart_data: body.chart_data,
            table_data: body.table_data,
            generated_by: generated_by.to_string(),
            generated_at_ms: now_ms(),
        };
        let saved = self.sources.reports.save_report(ctx, record).await?;
        hms_telemetry::record_report_generated();
        info!(
            hotel_id = %ctx.hotel_id,
            report_id = %saved.report_id,
            report_type = saved.report_type.as_str(),
            rows = saved.table_data.len(),
            "report generated"
        );
        Ok(saved)
    }

    pub async fn list(&self, ctx: &HotelContext) -> Result<Vec<ReportRecord>, ReportError> {
        Ok(self.sources.reports.list_reports(ctx).await?)
    }

    pub async fn get(&self, ctx: &HotelContext, report_id: &str) -> Result<ReportRecord, ReportError> {
        self.sources
            .reports
            .find_report(ctx, report_id)
            .await?
            .ok_or(ReportError::NotFound)
    }

    /// 导出报表表格为 CSV，并追加一条导出日志。
    pub async fn export(
        &self,
        ctx: &HotelContext,
        report_id: &str,
        exported_by: &str,
    ) -> Result<ReportExport, ReportError> {
        let report = self.get(ctx, report_id).await?;
        let content = to_csv(&report.table_data);
        let file_name = export_file_name(report.report_type, Utc::now().date_naive());
        let log = ExportLogRecord {
            export_id: format!("export-{}", Uuid::new_v4()),
            hotel_id: ctx.hotel_id.clone(),
            report_id: report.report_id.clone(),
            report_type: report.report_type,
            file_name: file_name.clone(),
            row_count: report.table_data.len(),
            exported_by: exported_by.to_string(),
            exported_at_ms: now_ms(),
        };
        let log = self.sources.export_logs.append_export_log(ctx, log).await?;
        hms_telemetry::record_report_exported();
        Ok(ReportExport {
            file_name,
            content,
            log,
        })
    }

    pub async fn export_logs(&self, ctx: &HotelContext) -> Result<Vec<ExportLogRecord>, ReportError> {
        Ok(self.sources.export_logs.list_export_logs(ctx).await?)
    }

    /// 活跃预订与已归档预订一起参与统计。
    async fn all_bookings(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<hms_storage::BookingRecord>, StorageError> {
        let mut bookings = self
            .sources
            .bookings
            .list_bookings(ctx, &BookingFilter::default())
            .await?;
        bookings.extend(self.sources.bookings.list_archived_bookings(ctx).await?);
        Ok(bookings)
    }
}

fn parse_period(date_from: &str, date_to: &str) -> Result<Period, ReportError> {
    let parse = |text: &str| {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| ReportError::InvalidPeriod(format!("expected YYYY-MM-DD, got {text:?}")))
    };
    let from = parse(date_from)?;
    let to = parse(date_to)?;
    if from > to {
        return Err(ReportError::InvalidPeriod(format!("{from} is after {to}")));
    }
    Ok(Period { from, to })
}
