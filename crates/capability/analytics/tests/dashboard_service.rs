use async_trait::async_trait;
use domain::HotelContext;
use domain::timestamp::now_ms;
use hms_analytics::{DashboardService, DashboardSources, StatsSource};
use hms_storage::{
    BookingFilter, BookingStore, DashboardStats, DashboardStatsRecord, InMemoryBookingStore,
    InMemoryInventoryStore, InMemoryRoomStore, InMemoryStaffStore, InMemoryStatsStore, StaffRecord,
    StaffStore, StaffUpdate, StatsStore, StorageError, demo_data,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

const HOTEL: &str = "hotel-1";

fn ctx() -> HotelContext {
    HotelContext::new(HOTEL, "user-1", vec![], vec![])
}

fn sources(stats: Arc<dyn StatsStore>) -> DashboardSources {
    let data = demo_data(HOTEL, now_ms());
    DashboardSources {
        bookings: Arc::new(InMemoryBookingStore::with_bookings(data.bookings)),
        rooms: Arc::new(InMemoryRoomStore::with_rooms(data.rooms)),
        inventory: Arc::new(InMemoryInventoryStore::with_items(data.inventory)),
        staff: Arc::new(InMemoryStaffStore::with_staff(data.staff)),
        stats,
    }
}

struct BrokenStatsStore;

#[async_trait]
impl StatsStore for BrokenStatsStore {
    async fn get_dashboard_stats(
        &self,
        _ctx: &HotelContext,
    ) -> Result<Option<DashboardStatsRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn put_dashboard_stats(
        &self,
        _ctx: &HotelContext,
        _record: DashboardStatsRecord,
    ) -> Result<(), StorageError> {
        Err(StorageError::new("connection refused"))
    }
}

/// 读取员工列表后暂停，直到测试放行。
struct GatedStaffStore {
    inner: InMemoryStaffStore,
    armed: AtomicBool,
    reached: Notify,
    release: Notify,
}

#[async_trait]
impl StaffStore for GatedStaffStore {
    async fn list_staff(&self, ctx: &HotelContext) -> Result<Vec<StaffRecord>, StorageError> {
        let staff = self.inner.list_staff(ctx).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        Ok(staff)
    }

    async fn find_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<Option<StaffRecord>, StorageError> {
        self.inner.find_staff(ctx, staff_id).await
    }

    async fn create_staff(
        &self,
        ctx: &HotelContext,
        record: StaffRecord,
    ) -> Result<StaffRecord, StorageError> {
        self.inner.create_staff(ctx, record).await
    }

    async fn update_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Option<StaffRecord>, StorageError> {
        self.inner.update_staff(ctx, staff_id, update).await
    }

    async fn delete_staff(&self, ctx: &HotelContext, staff_id: &str) -> Result<bool, StorageError> {
        self.inner.delete_staff(ctx, staff_id).await
    }
}

#[tokio::test]
async fn computes_then_serves_cached_snapshot() {
    let stats_store = Arc::new(InMemoryStatsStore::new());
    let service = DashboardService::new(sources(stats_store.clone()), Duration::from_secs(60));

    let first = service.stats(&ctx()).await;
    assert_eq!(first.source, StatsSource::Computed);
    assert_eq!(first.stats.total_rooms, 6);
    assert!(first.stats.total_bookings > 0);

    let second = service.stats(&ctx()).await;
    assert_eq!(second.source, StatsSource::Cached);
    assert_eq!(second.stats, first.stats);

    let document = stats_store
        .get_dashboard_stats(&ctx())
        .await
        .expect("get")
        .expect("persisted");
    assert_eq!(document.stats, first.stats);
}

#[tokio::test]
async fn fresh_document_from_another_writer_is_used() {
    let stats_store = Arc::new(InMemoryStatsStore::new());
    let written = DashboardStats {
        total_bookings: 999,
        ..DashboardStats::default()
    };
    stats_store
        .put_dashboard_stats(
            &ctx(),
            DashboardStatsRecord {
                hotel_id: HOTEL.to_string(),
                stats: written.clone(),
                updated_at_ms: now_ms(),
            },
        )
        .await
        .expect("put");
    let service = DashboardService::new(sources(stats_store), Duration::from_secs(60));

    let snapshot = service.stats(&ctx()).await;
    assert_eq!(snapshot.source, StatsSource::Document);
    assert_eq!(snapshot.stats, written);
}

#[tokio::test]
async fn stale_document_is_recomputed() {
    let stats_store = Arc::new(InMemoryStatsStore::new());
    stats_store
        .put_dashboard_stats(
            &ctx(),
            DashboardStatsRecord {
                hotel_id: HOTEL.to_string(),
                stats: DashboardStats::default(),
                updated_at_ms: now_ms() - 3_600_000,
            },
        )
        .await
        .expect("put");
    let service = DashboardService::new(sources(stats_store), Duration::from_secs(60));

    let snapshot = service.stats(&ctx()).await;
    assert_eq!(snapshot.source, StatsSource::Computed);
    assert_eq!(snapshot.stats.total_rooms, 6);
}

#[tokio::test]
async fn invalidation_skips_cache_and_document() {
    let service = DashboardService::new(
        sources(Arc::new(InMemoryStatsStore::new())),
        Duration::from_secs(60),
    );
    assert_eq!(service.stats(&ctx()).await.source, StatsSource::Computed);
    assert_eq!(service.stats(&ctx()).await.source, StatsSource::Cached);

    service.invalidate(HOTEL);
    assert_eq!(service.stats(&ctx()).await.source, StatsSource::Computed);
    assert_eq!(service.stats(&ctx()).await.source, StatsSource::Cached);
}

#[tokio::test]
async fn storage_failure_serves_fallback_constants() {
    let service = DashboardService::new(sources(Arc::new(BrokenStatsStore)), Duration::from_secs(60));

    let snapshot = service.stats(&ctx()).await;
    assert_eq!(snapshot.source, StatsSource::Fallback);
    assert_eq!(snapshot.stats, DashboardStats::fallback());
}

#[tokio::test]
async fn refresh_survives_failed_document_write() {
    let service = DashboardService::new(sources(Arc::new(BrokenStatsStore)), Duration::from_secs(60));

    let snapshot = service.refresh(&ctx()).await;
    assert_eq!(snapshot.source, StatsSource::Computed);
    assert_eq!(snapshot.stats.total_rooms, 6);
}

#[tokio::test]
async fn write_during_computation_is_not_cached_as_fresh() {
    let data = demo_data(HOTEL, now_ms());
    let bookings = Arc::new(InMemoryBookingStore::with_bookings(data.bookings));
    let staff = Arc::new(GatedStaffStore {
        inner: InMemoryStaffStore::with_staff(data.staff),
        armed: AtomicBool::new(true),
        reached: Notify::new(),
        release: Notify::new(),
    });
    let stats_store = Arc::new(InMemoryStatsStore::new());
    let service = Arc::new(DashboardService::new(
        DashboardSources {
            bookings: bookings.clone(),
            rooms: Arc::new(InMemoryRoomStore::with_rooms(data.rooms)),
            inventory: Arc::new(InMemoryInventoryStore::with_items(data.inventory)),
            staff: staff.clone(),
            stats: stats_store.clone(),
        },
        Duration::from_secs(60),
    ));

    let active = bookings
        .list_bookings(&ctx(), &BookingFilter::default())
        .await
        .expect("list");
    let before = active.len() as u64;

    let reader = tokio::spawn({
        let service = service.clone();
        async move { service.stats(&ctx()).await }
    });
    staff.reached.notified().await;

    assert!(
        bookings
            .delete_booking(&ctx(), &active[0].booking_id)
            .await
            .expect("delete")
    );
    service.invalidate(HOTEL);
    staff.release.notify_one();

    let stale = reader.await.expect("join");
    assert_eq!(stale.stats.total_bookings, before);
    assert!(
        stats_store
            .get_dashboard_stats(&ctx())
            .await
            .expect("get")
            .is_none()
    );

    let next = service.stats(&ctx()).await;
    assert_eq!(next.source, StatsSource::Computed);
    assert_eq!(next.stats.total_bookings, before - 1);
    let cached = service.stats(&ctx()).await;
    assert_eq!(cached.source, StatsSource::Cached);
    assert_eq!(cached.stats.total_bookings, before - 1);
}
