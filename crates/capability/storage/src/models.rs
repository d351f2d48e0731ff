//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 账户：UserRecord
//! - 预订：BookingRecord, BookingUpdate, BookingFilter
//! - 房间：RoomRecord, RoomUpdate
//! - 库存：InventoryItemRecord, InventoryItemUpdate, InventoryActivityRecord
//! - 采购：PurchaseOrderRecord
//! - 员工：StaffRecord, StaffUpdate, EmergencyContact
//! - 支付：PaymentRecord, PaymentFilter
//! - 报表：ReportRecord, ChartPoint, ExportLogRecord
//! - 联系申请：ContactRequestRecord
//! - 看板统计文档：DashboardStats, DashboardStatsRecord

use domain::{
    BookingStatus, ContactStatus, InquiryType, InventoryActivityKind, PaymentMethod,
    PaymentStatus, PurchaseOrderStatus, ReportType, RoomStatus, StaffRole, StaffStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 登录账户记录。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub hotel_id: String,
    pub user_id: String,
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl UserRecord {
    /// 将账户记录转换为 HotelContext。
    pub fn to_hotel_context(&self) -> domain::HotelContext {
        domain::HotelContext::new(
            self.hotel_id.clone(),
            self.user_id.clone(),
            self.roles.clone(),
            self.permissions.clone(),
        )
    }
}

/// 预订记录。
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub booking_id: String,
    pub hotel_id: String,
    pub guest_user_id: String,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub room_number: String,
    /// 原样保存的入住日期文本（见 `domain::timestamp`）。
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub archived: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 预订更新输入。
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub room_number: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub total_amount: Option<f64>,
    pub status: Option<BookingStatus>,
    pub updated_at_ms: i64,
}

/// 预订列表过滤条件。
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub guest_user_id: Option<String>,
}

impl BookingFilter {
    pub fn matches(&self, record: &BookingRecord) -> bool {
        self.status.is_none_or(|status| record.status == status)
            && self
                .guest_user_id
                .as_deref()
                .is_none_or(|user_id| record.guest_user_id == user_id)
    }
}

/// 房间记录。
#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub room_id: String,
    pub hotel_id: String,
    pub room_number: String,
    pub room_type: String,
    pub floor: i32,
    pub price_per_night: f64,
    pub status: RoomStatus,
}

/// 房间更新输入。
#[derive(Debug, Clone, Default)]
pub struct RoomUpdate {
    pub room_type: Option<String>,
    pub floor: Option<i32>,
    pub price_per_night: Option<f64>,
    pub status: Option<RoomStatus>,
}

/// 库存物品记录。
#[derive(Debug, Clone)]
pub struct InventoryItemRecord {
    pub item_id: String,
    pub hotel_id: String,
    pub name: String,
    pub category: String,
    pub current_stock: i64,
    pub reorder_level: i64,
    pub unit_price: f64,
    pub supplier: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl InventoryItemRecord {
    /// 低库存：当前库存不高于补货线。
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.reorder_level
    }

    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }
}

/// 库存物品更新输入。
#[derive(Debug, Clone, Default)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub reorder_level: Option<i64>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// 库存变动记录。
#[derive(Debug, Clone)]
pub struct InventoryActivityRecord {
    pub activity_id: String,
    pub hotel_id: String,
    pub item_id: String,
    pub item_name: String,
    pub kind: InventoryActivityKind,
    pub quantity_delta: i64,
    pub stock_after: i64,
    pub actor_id: String,
    pub at_ms: i64,
}

/// 采购单记录。
#[derive(Debug, Clone)]
pub struct PurchaseOrderRecord {
    pub order_id: String,
    pub hotel_id: String,
    pub supplier: String,
    pub description: Option<String>,
    pub total_amount: f64,
    pub status: PurchaseOrderStatus,
    pub ordered_at_ms: i64,
}

/// 紧急联系人。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: Option<String>,
}

/// 员工记录。
#[derive(Debug, Clone)]
pub struct StaffRecord {
    pub staff_id: String,
    pub hotel_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub department: String,
    pub position: String,
    pub status: StaffStatus,
    pub permissions: Vec<String>,
    pub salary: f64,
    pub emergency_contact: Option<EmergencyContact>,
    pub hired_at: Option<String>,
}

/// 员工更新输入。
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<StaffRole>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<StaffStatus>,
    pub permissions: Option<Vec<String>>,
    pub salary: Option<f64>,
    pub emergency_contact: Option<EmergencyContact>,
}

/// 支付记录。
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub hotel_id: String,
    pub guest_name: String,
    pub room_number: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_at_ms: i64,
    pub reference: String,
    pub description: Option<String>,
}

/// 支付列表过滤条件。
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
}

impl PaymentFilter {
    pub fn matches(&self, record: &PaymentRecord) -> bool {
        self.status.is_none_or(|status| record.status == status)
            && self.method.is_none_or(|method| record.payment_method == method)
    }
}

/// 图表数据点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// 报表表格行（保持字段插入顺序）。
pub type TableRow = serde_json::Map<String, serde_json::Value>;

/// 报表快照记录。
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub report_id: String,
    pub hotel_id: String,
    pub report_type: ReportType,
    pub date_from: String,
    pub date_to: String,
    pub summary: BTreeMap<String, f64>,
    pub chart_data: Vec<ChartPoint>,
    pub table_data: Vec<TableRow>,
    pub generated_by: String,
    pub generated_at_ms: i64,
}

/// 导出日志记录。
#[derive(Debug, Clone)]
pub struct ExportLogRecord {
    pub export_id: String,
    pub hotel_id: String,
    pub report_id: String,
    pub report_type: ReportType,
    pub file_name: String,
    pub row_count: usize,
    pub exported_by: String,
    pub exported_at_ms: i64,
}

/// 联系申请记录。
#[derive(Debug, Clone)]
pub struct ContactRequestRecord {
    pub request_id: String,
    pub hotel_id: String,
    pub reference_number: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: InquiryType,
    pub booking_reference: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 看板统计值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub checked_in_bookings: u64,
    pub cancelled_bookings: u64,
    pub today_check_ins: u64,
    pub total_rooms: u64,
    pub available_rooms: u64,
    pub occupied_rooms: u64,
    pub occupancy_rate: u32,
    pub total_revenue: f64,
    pub inventory_items: u64,
    pub low_stock_items: u64,
    pub total_staff: u64,
    pub active_staff: u64,
}

impl DashboardStats {
    /// 无法读取数据时展示的兜底数值。
    pub fn fallback() -> Self {
        Self {
            total_bookings: 156,
            pending_bookings: 12,
            confirmed_bookings: 38,
            checked_in_bookings: 24,
            cancelled_bookings: 9,
            today_check_ins: 8,
            total_rooms: 50,
            available_rooms: 15,
            occupied_rooms: 35,
            occupancy_rate: 70,
            total_revenue: 45_680.0,
            inventory_items: 120,
            low_stock_items: 7,
            total_staff: 32,
            active_staff: 28,
        }
    }
}

/// 看板统计文档（`stats/dashboard`）。
#[derive(Debug, Clone)]
pub struct DashboardStatsRecord {
    pub hotel_id: String,
    pub stats: DashboardStats,
    pub updated_at_ms: i64,
}
