//! 看板统计服务。
//!
//! 解析顺序：进程内快照 → `stats/dashboard` 文档 → 重新计算并回写 → 兜底常量。
//! 快照与文档在刷新间隔内视为新鲜；写入触发的失效会跳过前两步直接重算。
//! 每次失效递增酒店的代数，读取开始后代数变化的结果不回写快照与文档。

use crate::dashboard::aggregate_dashboard;
use chrono::{TimeZone, Utc};
use domain::HotelContext;
use domain::timestamp::now_ms;
use hms_storage::{
    BookingFilter, BookingStore, DashboardStats, DashboardStatsRecord, InventoryStore, RoomStore,
    StaffStore, StatsStore, StorageError,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// 统计所需的存储集合。
#[derive(Clone)]
pub struct DashboardSources {
    pub bookings: Arc<dyn BookingStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub staff: Arc<dyn StaffStore>,
    pub stats: Arc<dyn StatsStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsSource {
    Cached,
    Document,
    Computed,
    Fallback,
}

impl StatsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsSource::Cached => "cached",
            StatsSource::Document => "document",
            StatsSource::Computed => "computed",
            StatsSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub source: StatsSource,
    pub updated_at_ms: i64,
}

#[derive(Default)]
struct CacheState {
    snapshots: HashMap<String, DashboardSnapshot>,
    invalidated: HashSet<String>,
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn generation(&self, hotel_id: &str) -> u64 {
        self.generations.get(hotel_id).copied().unwrap_or(0)
    }
}

/// 一次读取的起点：开始时的缓存结果、失效标记与代数。
struct Lookup {
    cached: Option<DashboardSnapshot>,
    invalidated: bool,
    generation: u64,
}

pub struct DashboardService {
    sources: DashboardSources,
    refresh_interval_ms: i64,
    state: Mutex<CacheState>,
}

impl DashboardService {
    pub fn new(sources: DashboardSources, refresh_interval: Duration) -> Self {
        Self {
            sources,
            refresh_interval_ms: i64::try_from(refresh_interval.as_millis()).unwrap_or(i64::MAX),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// 读取看板统计；不会失败，存储异常时返回兜底常量。
    pub async fn stats(&self, ctx: &HotelContext) -> DashboardSnapshot {
        let now = now_ms();
        let lookup = self.lookup(&ctx.hotel_id, now);
        if let Some(snapshot) = lookup.cached {
            hms_telemetry::record_dashboard_cache_hit();
            return snapshot;
        }
        let result = if lookup.invalidated {
            self.compute(ctx, now, lookup.generation).await
        } else {
            self.resolve(ctx, now, lookup.generation).await
        };
        result.unwrap_or_else(|err| self.fallback(ctx, &err, now))
    }

    /// 强制按集合重新计算。
    pub async fn refresh(&self, ctx: &HotelContext) -> DashboardSnapshot {
        let now = now_ms();
        let generation = self.generation(&ctx.hotel_id);
        self.compute(ctx, now, generation)
            .await
            .unwrap_or_else(|err| self.fallback(ctx, &err, now))
    }

    /// 丢弃酒店的进程内快照，下次读取重新计算。
    pub fn invalidate(&self, hotel_id: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.snapshots.remove(hotel_id);
            state.invalidated.insert(hotel_id.to_string());
            *state.generations.entry(hotel_id.to_string()).or_insert(0) += 1;
        }
    }

    fn generation(&self, hotel_id: &str) -> u64 {
        self.state
            .lock()
            .map(|state| state.generation(hotel_id))
            .unwrap_or(0)
    }

    /// 代数未变时结果仍然有效。
    fn is_current(&self, hotel_id: &str, generation: u64) -> bool {
        self.state
            .lock()
            .map(|state| state.generation(hotel_id) == generation)
            .unwrap_or(false)
    }

    fn lookup(&self, hotel_id: &str, now: i64) -> Lookup {
        let Ok(state) = self.state.lock() else {
            return Lookup {
                cached: None,
                invalidated: false,
                generation: 0,
            };
        };
        let generation = state.generation(hotel_id);
        if state.invalidated.contains(hotel_id) {
            return Lookup {
                cached: None,
                invalidated: true,
                generation,
            };
        }
        let cached = state
            .snapshots
            .get(hotel_id)
            .filter(|snapshot| self.is_fresh(snapshot.updated_at_ms, now))
            .map(|snapshot| DashboardSnapshot {
                source: StatsSource::Cached,
                ..snapshot.clone()
            });
        Lookup {
            cached,
            invalidated: false,
            generation,
        }
    }

    async fn resolve(
        &self,
        ctx: &HotelContext,
        now: i64,
        generation: u64,
    ) -> Result<DashboardSnapshot, StorageError> {
        if let Some(document) = self.sources.stats.get_dashboard_stats(ctx).await?
            && self.is_fresh(document.updated_at_ms, now)
        {
            debug!(hotel_id = %ctx.hotel_id, "dashboard stats served from document");
            let snapshot = DashboardSnapshot {
                stats: document.stats,
                source: StatsSource::Document,
                updated_at_ms: document.updated_at_ms,
            };
            self.remember(&ctx.hotel_id, generation, &snapshot);
            return Ok(snapshot);
        }
        self.compute(ctx, now, generation).await
    }

    async fn compute(
        &self,
        ctx: &HotelContext,
        now: i64,
        generation: u64,
    ) -> Result<DashboardSnapshot, StorageError> {
        let bookings = self
            .sources
            .bookings
            .list_bookings(ctx, &BookingFilter::default())
            .await?;
        let rooms = self.sources.rooms.list_rooms(ctx).await?;
        let items = self.sources.inventory.list_items(ctx).await?;
        let staff = self.sources.staff.list_staff(ctx).await?;
        let today = Utc
            .timestamp_millis_opt(now)
            .single()
            .unwrap_or_else(Utc::now)
            .date_naive();
        let stats = aggregate_dashboard(&bookings, &rooms, &items, &staff, today);
        hms_telemetry::record_dashboard_computation();

        let snapshot = DashboardSnapshot {
            stats,
            source: StatsSource::Computed,
            updated_at_ms: now,
        };
        if !self.is_current(&ctx.hotel_id, generation) {
            debug!(hotel_id = %ctx.hotel_id, "dashboard stats superseded by a newer write");
            return Ok(snapshot);
        }
        let record = DashboardStatsRecord {
            hotel_id: ctx.hotel_id.clone(),
            stats: snapshot.stats.clone(),
            updated_at_ms: now,
        };
        if let Err(err) = self.sources.stats.put_dashboard_stats(ctx, record).await {
            warn!(hotel_id = %ctx.hotel_id, error = %err, "dashboard stats document not saved");
        }
        self.remember(&ctx.hotel_id, generation, &snapshot);
        Ok(snapshot)
    }

    fn fallback(&self, ctx: &HotelContext, err: &StorageError, now: i64) -> DashboardSnapshot {
        warn!(hotel_id = %ctx.hotel_id, error = %err, "dashboard stats unavailable, serving fallback");
        hms_telemetry::record_dashboard_fallback();
        DashboardSnapshot {
            stats: DashboardStats::fallback(),
            source: StatsSource::Fallback,
            updated_at_ms: now,
        }
    }

    /// 只有读取期间没有新的失效时才写入快照并清除失效标记。
    fn remember(&self, hotel_id: &str, generation: u64, snapshot: &DashboardSnapshot) {
        if let Ok(mut state) = self.state.lock() {
            if state.generation(hotel_id) != generation {
                return;
            }
            state.invalidated.remove(hotel_id);
            state
                .snapshots
                .insert(hotel_id.to_string(), snapshot.clone());
        }
    }

    fn is_fresh(&self, updated_at_ms: i64, now: i64) -> bool {
        now.saturating_sub(updated_at_ms) <= self.refresh_interval_ms
    }
}
