//! Postgres 看板统计文档实现

use crate::error::StorageError;
use crate::models::DashboardStatsRecord;
use crate::postgres::json_column;
use crate::traits::StatsStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::{PgPool, Row};

pub struct PgStatsStore {
    pub pool: PgPool,
}

impl PgStatsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl StatsStore for PgStatsStore {
    async fn get_dashboard_stats(
        &self,
        ctx: &HotelContext,
    ) -> Result<Option<DashboardStatsRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let row = sqlx::query(
            "select hotel_id, stats, updated_at_ms from dashboard_stats where hotel_id = $1",
        )
        .bind(&ctx.hotel_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(DashboardStatsRecord {
            hotel_id: row.try_get("hotel_id")?,
            stats: json_column(&row, "stats")?,
            updated_at_ms: row.try_get("updated_at_ms")?,
        }))
    }

    async fn put_dashboard_stats(
        &self,
        ctx: &HotelContext,
        record: DashboardStatsRecord,
    ) -> Result<(), StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let stats = serde_json::to_string(&record.stats)?;
        sqlx::query(
            "insert into dashboard_stats (hotel_id, stats, updated_at_ms) values ($1, $2, $3) \
             on conflict (hotel_id) do update set stats = excluded.stats, updated_at_ms = excluded.updated_at_ms",
        )
        .bind(&record.hotel_id)
        .bind(stats)
        .bind(record.updated_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
