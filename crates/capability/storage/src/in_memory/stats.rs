//! 看板统计文档内存实现

use crate::error::StorageError;
use crate::models::DashboardStatsRecord;
use crate::traits::StatsStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 每个酒店一份 `stats/dashboard` 文档。
pub struct InMemoryStatsStore {
    documents: RwLock<HashMap<String, DashboardStatsRecord>>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStatsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn get_dashboard_stats(
        &self,
        ctx: &HotelContext,
    ) -> Result<Option<DashboardStatsRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .documents
            .read()
            .ok()
            .and_then(|map| map.get(&ctx.hotel_id).cloned()))
    }

    async fn put_dashboard_stats(
        &self,
        ctx: &HotelContext,
        record: DashboardStatsRecord,
    ) -> Result<(), StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .documents
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(record.hotel_id.clone(), record);
        Ok(())
    }
}
