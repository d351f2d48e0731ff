//! 报表快照与导出日志内存存储实现

use crate::error::StorageError;
use crate::models::{ExportLogRecord, ReportRecord};
use crate::traits::{ExportLogStore, ReportStore};
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryReportStore {
    reports: RwLock<HashMap<String, ReportRecord>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_reports(&self, ctx: &HotelContext) -> Result<Vec<ReportRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<ReportRecord> = self
            .reports
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.generated_at_ms.cmp(&a.generated_at_ms));
        Ok(items)
    }

    async fn find_report(
        &self,
        ctx: &HotelContext,
        report_id: &str,
    ) -> Result<Option<ReportRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .reports
            .read()
            .ok()
            .and_then(|map| map.get(report_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn save_report(
        &self,
        ctx: &HotelContext,
        record: ReportRecord,
    ) -> Result<ReportRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .reports
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(record.report_id.clone(), record.clone());
        Ok(record)
    }
}

pub struct InMemoryExportLogStore {
    logs: RwLock<Vec<ExportLogRecord>>,
}

impl InMemoryExportLogStore {
    pub fn new() -> Self {
        Self {
            logs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryExportLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ExportLogStore for InMemoryExportLogStore {
    async fn append_export_log(
        &self,
        ctx: &HotelContext,
        record: ExportLogRecord,
    ) -> Result<ExportLogRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut logs = self
            .logs
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        logs.push(record.clone());
        Ok(record)
    }

    async fn list_export_logs(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<ExportLogRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let logs = self
            .logs
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(logs
            .iter()
            .rev()
            .filter(|item| item.hotel_id == ctx.hotel_id)
            .cloned()
            .collect())
    }
}
