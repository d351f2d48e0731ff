//! 内存存储实现模块
//!
//! 用于本地演示和测试，`seed` 提供演示数据。
//!
//! 包含以下实现：
//! - UserStore: InMemoryUserStore
//! - BookingStore: InMemoryBookingStore
//! - RoomStore: InMemoryRoomStore
//! - InventoryStore: InMemoryInventoryStore
//! - PurchaseOrderStore: InMemoryPurchaseOrderStore
//! - StaffStore: InMemoryStaffStore
//! - PaymentStore: InMemoryPaymentStore
//! - ReportStore / ExportLogStore: InMemoryReportStore / InMemoryExportLogStore
//! - ContactRequestStore: InMemoryContactRequestStore
//! - StatsStore: InMemoryStatsStore

pub mod booking;
pub mod contact;
pub mod inventory;
pub mod payment;
pub mod purchase_order;
pub mod report;
pub mod room;
pub mod seed;
pub mod staff;
pub mod stats;
pub mod user;

pub use booking::*;
pub use contact::*;
pub use inventory::*;
pub use payment::*;
pub use purchase_order::*;
pub use report::*;
pub use room::*;
pub use seed::{DemoData, demo_data};
pub use staff::*;
pub use stats::*;
pub use user::*;
