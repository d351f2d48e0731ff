//! 存储接口 Trait 定义
//!
//! 每个集合一个异步接口：
//! - UserStore：登录账户
//! - BookingStore：预订与预订归档
//! - RoomStore：房间
//! - InventoryStore：库存物品与库存变动
//! - PurchaseOrderStore：采购单
//! - StaffStore：员工
//! - PaymentStore：支付
//! - ReportStore / ExportLogStore：报表快照与导出日志
//! - ContactRequestStore：联系申请
//! - StatsStore：看板统计文档
//!
//! 所有接口显式接收 HotelContext，按 hotel_id 隔离数据。

use crate::error::StorageError;
use crate::models::{
    BookingFilter, BookingRecord, BookingUpdate, ContactRequestRecord, DashboardStatsRecord,
    ExportLogRecord, InventoryActivityRecord, InventoryItemRecord, InventoryItemUpdate,
    PaymentFilter, PaymentRecord, PurchaseOrderRecord, ReportRecord, RoomRecord, RoomUpdate,
    StaffRecord, StaffUpdate, UserRecord,
};
use async_trait::async_trait;
use domain::{ContactStatus, HotelContext, PaymentStatus, PurchaseOrderStatus};

/// 用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 根据用户名查找用户（hotel_id 为空时跨酒店查找，用于登录）
    async fn find_by_username(
        &self,
        ctx: &HotelContext,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError>;

    /// 创建账户，用户名重复返回冲突错误
    async fn create_user(
        &self,
        ctx: &HotelContext,
        record: UserRecord,
    ) -> Result<UserRecord, StorageError>;

    async fn update_password_hash(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError>;

    async fn get_refresh_jti(
        &self,
        ctx: &HotelContext,
        user_id: &str,
    ) -> Result<Option<String>, StorageError>;

    async fn set_refresh_jti(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError>;
}

/// 预订存储接口
///
/// 活跃预订与归档预订是两个集合，归档即从前者移动到后者。
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_bookings(
        &self,
        ctx: &HotelContext,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingRecord>, StorageError>;

    async fn find_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError>;

    async fn create_booking(
        &self,
        ctx: &HotelContext,
        record: BookingRecord,
    ) -> Result<BookingRecord, StorageError>;

    async fn update_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        update: BookingUpdate,
    ) -> Result<Option<BookingRecord>, StorageError>;

    async fn delete_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<bool, StorageError>;

    /// 将活跃预订移入归档集合，返回归档后的记录
    async fn archive_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        archived_at_ms: i64,
    ) -> Result<Option<BookingRecord>, StorageError>;

    async fn find_archived_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError>;

    async fn list_archived_bookings(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<BookingRecord>, StorageError>;
}

/// 房间存储接口
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list_rooms(&self, ctx: &HotelContext) -> Result<Vec<RoomRecord>, StorageError>;

    async fn find_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
    ) -> Result<Option<RoomRecord>, StorageError>;

    /// 创建房间，同一酒店房间号重复返回冲突错误
    async fn create_room(
        &self,
        ctx: &HotelContext,
        record: RoomRecord,
    ) -> Result<RoomRecord, StorageError>;

    async fn update_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
        update: RoomUpdate,
    ) -> Result<Option<RoomRecord>, StorageError>;

    async fn delete_room(&self, ctx: &HotelContext, room_id: &str) -> Result<bool, StorageError>;
}

/// 库存存储接口
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_items(&self, ctx: &HotelContext)
    -> Result<Vec<InventoryItemRecord>, StorageError>;

    async fn find_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
    ) -> Result<Option<InventoryItemRecord>, StorageError>;

    async fn create_item(
        &self,
        ctx: &HotelContext,
        record: InventoryItemRecord,
    ) -> Result<InventoryItemRecord, StorageError>;

    async fn update_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        update: InventoryItemUpdate,
    ) -> Result<Option<InventoryItemRecord>, StorageError>;

    async fn delete_item(&self, ctx: &HotelContext, item_id: &str) -> Result<bool, StorageError>;

    /// 按增量调整库存；结果为负时返回 Invalid 错误且不修改
    async fn adjust_stock(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        delta: i64,
    ) -> Result<Option<InventoryItemRecord>, StorageError>;

    async fn record_activity(
        &self,
        ctx: &HotelContext,
        record: InventoryActivityRecord,
    ) -> Result<InventoryActivityRecord, StorageError>;

    /// 按时间倒序返回最近的库存变动
    async fn list_activities(
        &self,
        ctx: &HotelContext,
        limit: usize,
    ) -> Result<Vec<InventoryActivityRecord>, StorageError>;
}

/// 采购单存储接口
#[async_trait]
pub trait PurchaseOrderStore: Send + Sync {
    async fn list_orders(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<PurchaseOrderRecord>, StorageError>;

    async fn create_order(
        &self,
        ctx: &HotelContext,
        record: PurchaseOrderRecord,
    ) -> Result<PurchaseOrderRecord, StorageError>;

    async fn update_order_status(
        &self,
        ctx: &HotelContext,
        order_id: &str,
        status: PurchaseOrderStatus,
    ) -> Result<Option<PurchaseOrderRecord>, StorageError>;
}

/// 员工存储接口
#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn list_staff(&self, ctx: &HotelContext) -> Result<Vec<StaffRecord>, StorageError>;

    async fn find_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<Option<StaffRecord>, StorageError>;

    async fn create_staff(
        &self,
        ctx: &HotelContext,
        record: StaffRecord,
    ) -> Result<StaffRecord, StorageError>;

    async fn update_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Option<StaffRecord>, StorageError>;

    async fn delete_staff(&self, ctx: &HotelContext, staff_id: &str)
    -> Result<bool, StorageError>;
}

/// 支付存储接口
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn list_payments(
        &self,
        ctx: &HotelContext,
        filter: &PaymentFilter,
    ) -> Result<Vec<PaymentRecord>, StorageError>;

    async fn find_payment(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
    ) -> Result<Option<PaymentRecord>, StorageError>;

    async fn create_payment(
        &self,
        ctx: &HotelContext,
        record: PaymentRecord,
    ) -> Result<PaymentRecord, StorageError>;

    async fn update_payment_status(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<PaymentRecord>, StorageError>;
}

/// 报表快照存储接口
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// 按生成时间倒序列出
    async fn list_reports(&self, ctx: &HotelContext) -> Result<Vec<ReportRecord>, StorageError>;

    async fn find_report(
        &self,
        ctx: &HotelContext,
        report_id: &str,
    ) -> Result<Option<ReportRecord>, StorageError>;

    async fn save_report(
        &self,
        ctx: &HotelContext,
        record: ReportRecord,
    ) -> Result<ReportRecord, StorageError>;
}

/// 导出日志存储接口（只追加）
#[async_trait]
pub trait ExportLogStore: Send + Sync {
    async fn append_export_log(
        &self,
        ctx: &HotelContext,
        record: ExportLogRecord,
    ) -> Result<ExportLogRecord, StorageError>;

    async fn list_export_logs(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<ExportLogRecord>, StorageError>;
}

/// 联系申请存储接口
#[async_trait]
pub trait ContactRequestStore: Send + Sync {
    async fn create_contact_request(
        &self,
        ctx: &HotelContext,
        record: ContactRequestRecord,
    ) -> Result<ContactRequestRecord, StorageError>;

    async fn list_contact_requests(
        &self,
        ctx: &HotelContext,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRequestRecord>, StorageError>;

    async fn find_contact_request(
        &self,
        ctx: &HotelContext,
        request_id: &str,
    ) -> Result<Option<ContactRequestRecord>, StorageError>;

    async fn update_contact_status(
        &self,
        ctx: &HotelContext,
        request_id: &str,
        status: ContactStatus,
        updated_at_ms: i64,
    ) -> Result<Option<ContactRequestRecord>, StorageError>;
}

/// 看板统计文档存储接口
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn get_dashboard_stats(
        &self,
        ctx: &HotelContext,
    ) -> Result<Option<DashboardStatsRecord>, StorageError>;

    async fn put_dashboard_stats(
        &self,
        ctx: &HotelContext,
        record: DashboardStatsRecord,
    ) -> Result<(), StorageError>;
}
