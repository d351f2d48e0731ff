//! 应用状态装配
//!
//! 按存储后端（内存 / PostgreSQL）构建各集合存储，再在其上组装
//! 认证、看板、报表、联系申请等能力服务。

use domain::HotelContext;
use domain::timestamp::now_ms;
use hms_analytics::{DashboardService, DashboardSources};
use hms_auth::{AuthService, JwtManager};
use hms_config::{AppConfig, StorageBackend};
use hms_contact::ContactService;
use hms_reports::{ReportService, ReportSources};
use hms_storage::in_memory::DEFAULT_HOTEL_ID;
use hms_storage::{
    BookingStore, ChangeEvent, ChangeFeed, ChangeKind, Collection, ContactRequestStore,
    ExportLogStore, InMemoryBookingStore, InMemoryContactRequestStore, InMemoryExportLogStore,
    InMemoryInventoryStore, InMemoryPaymentStore, InMemoryPurchaseOrderStore,
    InMemoryReportStore, InMemoryRoomStore, InMemoryStaffStore, InMemoryStatsStore,
    InMemoryUserStore, InventoryStore, PaymentStore, PgBookingStore, PgContactRequestStore,
    PgExportLogStore, PgInventoryStore, PgPaymentStore, PgPurchaseOrderStore, PgReportStore,
    PgRoomStore, PgStaffStore, PgStatsStore, PgUserStore, PurchaseOrderStore, ReportStore,
    RoomStore, StaffStore, StatsStore, StorageError, UserStore, apply_schema, connect_pool,
    demo_data,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 全部集合存储。
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub purchase_orders: Arc<dyn PurchaseOrderStore>,
    pub staff: Arc<dyn StaffStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub reports: Arc<dyn ReportStore>,
    pub export_logs: Arc<dyn ExportLogStore>,
    pub contact_requests: Arc<dyn ContactRequestStore>,
    pub stats: Arc<dyn StatsStore>,
}

impl Stores {
    /// 内存存储；`seed` 为真时按内置账户所在酒店写入演示数据。
    pub fn in_memory(seed: bool) -> Self {
        let users = Arc::new(InMemoryUserStore::with_default_admin());
        if !seed {
            return Self {
                users,
                bookings: Arc::new(InMemoryBookingStore::new()),
                rooms: Arc::new(InMemoryRoomStore::new()),
                inventory: Arc::new(InMemoryInventoryStore::new()),
                purchase_orders: Arc::new(InMemoryPurchaseOrderStore::new()),
                staff: Arc::new(InMemoryStaffStore::new()),
                payments: Arc::new(InMemoryPaymentStore::new()),
                reports: Arc::new(InMemoryReportStore::new()),
                export_logs: Arc::new(InMemoryExportLogStore::new()),
                contact_requests: Arc::new(InMemoryContactRequestStore::new()),
                stats: Arc::new(InMemoryStatsStore::new()),
            };
        }
        let demo = demo_data(DEFAULT_HOTEL_ID, now_ms());
        Self {
            users,
            bookings: Arc::new(InMemoryBookingStore::with_bookings(demo.bookings)),
            rooms: Arc::new(InMemoryRoomStore::with_rooms(demo.rooms)),
            inventory: Arc::new(InMemoryInventoryStore::with_items(demo.inventory)),
            purchase_orders: Arc::new(InMemoryPurchaseOrderStore::with_orders(
                demo.purchase_orders,
            )),
            staff: Arc::new(InMemoryStaffStore::with_staff(demo.staff)),
            payments: Arc::new(InMemoryPaymentStore::with_payments(demo.payments)),
            reports: Arc::new(InMemoryReportStore::new()),
            export_logs: Arc::new(InMemoryExportLogStore::new()),
            contact_requests: Arc::new(InMemoryContactRequestStore::new()),
            stats: Arc::new(InMemoryStatsStore::new()),
        }
    }

    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            bookings: Arc::new(PgBookingStore::new(pool.clone())),
            rooms: Arc::new(PgRoomStore::new(pool.clone())),
            inventory: Arc::new(PgInventoryStore::new(pool.clone())),
            purchase_orders: Arc::new(PgPurchaseOrderStore::new(pool.clone())),
            staff: Arc::new(PgStaffStore::new(pool.clone())),
            payments: Arc::new(PgPaymentStore::new(pool.clone())),
            reports: Arc::new(PgReportStore::new(pool.clone())),
            export_logs: Arc::new(PgExportLogStore::new(pool.clone())),
            contact_requests: Arc::new(PgContactRequestStore::new(pool.clone())),
            stats: Arc::new(PgStatsStore::new(pool.clone())),
        }
    }
}

/// 与存储无关的运行参数。
#[derive(Debug, Clone)]
pub struct StateOptions {
    pub default_hotel_id: String,
    pub currency: String,
    pub dashboard_refresh: Duration,
}

impl StateOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_hotel_id: config.default_hotel_id.clone(),
            currency: config.currency.clone(),
            dashboard_refresh: Duration::from_secs(config.dashboard_refresh_seconds),
        }
    }
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            default_hotel_id: DEFAULT_HOTEL_ID.to_string(),
            currency: "USD".to_string(),
            dashboard_refresh: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub db_pool: Option<PgPool>,
    pub booking_store: Arc<dyn BookingStore>,
    pub room_store: Arc<dyn RoomStore>,
    pub inventory_store: Arc<dyn InventoryStore>,
    pub purchase_order_store: Arc<dyn PurchaseOrderStore>,
    pub staff_store: Arc<dyn StaffStore>,
    pub payment_store: Arc<dyn PaymentStore>,
    pub dashboard: Arc<DashboardService>,
    pub reports: Arc<ReportService>,
    pub contact: Arc<ContactService>,
    pub changes: ChangeFeed,
    pub default_hotel_id: String,
    pub currency: String,
}

impl AppState {
    pub fn new(
        stores: Stores,
        jwt: JwtManager,
        options: StateOptions,
        db_pool: Option<PgPool>,
    ) -> Self {
        let dashboard = DashboardService::new(
            DashboardSources {
                bookings: stores.bookings.clone(),
                rooms: stores.rooms.clone(),
                inventory: stores.inventory.clone(),
                staff: stores.staff.clone(),
                stats: stores.stats.clone(),
            },
            options.dashboard_refresh,
        );
        let reports = ReportService::new(ReportSources {
            bookings: stores.bookings.clone(),
            rooms: stores.rooms.clone(),
            inventory: stores.inventory.clone(),
            staff: stores.staff.clone(),
            payments: stores.payments.clone(),
            reports: stores.reports.clone(),
            export_logs: stores.export_logs.clone(),
        });
        let contact = ContactService::new(stores.bookings.clone(), stores.contact_requests.clone());
        Self {
            auth: Arc::new(AuthService::new(stores.users, jwt)),
            db_pool,
            booking_store: stores.bookings,
            room_store: stores.rooms,
            inventory_store: stores.inventory,
            purchase_order_store: stores.purchase_orders,
            staff_store: stores.staff,
            payment_store: stores.payments,
            dashboard: Arc::new(dashboard),
            reports: Arc::new(reports),
            contact: Arc::new(contact),
            changes: ChangeFeed::default(),
            default_hotel_id: options.default_hotel_id,
            currency: options.currency,
        }
    }

    /// 写入成功后发布变更；影响看板的集合会使本酒店的统计快照失效。
    pub fn publish_change(
        &self,
        ctx: &HotelContext,
        collection: Collection,
        document_id: &str,
        kind: ChangeKind,
    ) {
        if collection.affects_dashboard() {
            self.dashboard.invalidate(&ctx.hotel_id);
        }
        let receivers = self.changes.publish(ChangeEvent::new(
            ctx.hotel_id.clone(),
            collection,
            document_id,
            kind,
        ));
        hms_telemetry::record_change_event_published();
        debug!(
            hotel_id = %ctx.hotel_id,
            collection = collection.as_str(),
            document_id,
            receivers,
            "change published"
        );
    }
}

/// 按配置选择存储后端并构建应用状态。
pub async fn build_state(config: &AppConfig) -> Result<AppState, StorageError> {
    let jwt = JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_access_ttl_seconds,
        config.jwt_refresh_ttl_seconds,
    );
    let options = StateOptions::from_config(config);
    match config.storage {
        StorageBackend::Memory => {
            info!(seed_demo_data = config.seed_demo_data, "using in-memory storage");
            Ok(AppState::new(
                Stores::in_memory(config.seed_demo_data),
                jwt,
                options,
                None,
            ))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| StorageError::new("HMS_DATABASE_URL is not set"))?;
            let pool = connect_pool(database_url).await?;
            apply_schema(&pool).await?;
            info!("using postgres storage");
            Ok(AppState::new(
                Stores::postgres(&pool),
                jwt,
                options,
                Some(pool),
            ))
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::Response;
    use http_body_util::BodyExt;

    /// 带演示数据的内存状态。
    pub fn seeded_state() -> AppState {
        AppState::new(
            Stores::in_memory(true),
            JwtManager::new("secret".to_string(), 3600, 3600),
            StateOptions::default(),
            None,
        )
    }

    pub fn empty_state() -> AppState {
        AppState::new(
            Stores::in_memory(false),
            JwtManager::new("secret".to_string(), 3600, 3600),
            StateOptions::default(),
            None,
        )
    }

    pub fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
        );
        headers
    }

    pub async fn admin_headers(state: &AppState) -> HeaderMap {
        let (_, tokens) = state.auth.login("admin", "admin123").await.expect("login");
        bearer(&tokens.access_token)
    }

    pub async fn guest_headers(state: &AppState) -> HeaderMap {
        let (_, tokens) = state.auth.login("guest", "guest123").await.expect("login");
        bearer(&tokens.access_token)
    }

    pub async fn read_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json")
    }

    /// 指定权限的 token（hotel-1 / user-1）。
    pub fn headers_with(permissions: &[&str]) -> HeaderMap {
        let jwt = JwtManager::new("secret".to_string(), 3600, 3600);
        let ctx = HotelContext::new(
            DEFAULT_HOTEL_ID,
            "user-1",
            Vec::new(),
            permissions.iter().map(|code| (*code).to_string()).collect(),
        );
        let tokens = jwt.issue_tokens(&ctx).expect("token");
        bearer(&tokens.access_token)
    }
}
