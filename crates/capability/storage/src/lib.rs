//! # HMS Storage 模块
//!
//! 酒店后台的数据存储抽象层，支持内存与 PostgreSQL 两种后端。
//!
//! ## 分层
//!
//! 1. **接口抽象层** (`traits.rs`)：每个集合一个异步 Trait
//! 2. **数据模型层** (`models.rs`)：记录、更新输入、过滤条件
//! 3. **错误处理层** (`error.rs`)：统一的 `StorageError`（带类别）
//! 4. **验证辅助层** (`validation.rs`)：酒店作用域校验
//! 5. **连接管理层** (`connection.rs`)：连接池与建表脚本
//! 6. **变更通知** (`changes.rs`)：写入后的 `ChangeEvent` 广播
//! 7. **实现层**：
//!    - `in_memory/`：`RwLock<HashMap>` 实现，附带演示数据
//!    - `postgres/`：sqlx 参数化查询实现
//!
//! ## 多酒店隔离
//!
//! 所有存储接口都显式接收 `HotelContext`，查询按 `hotel_id` 过滤；
//! 写入时记录的 `hotel_id` 必须与上下文一致。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use hms_storage::{BookingFilter, BookingStore, InMemoryBookingStore};
//! use domain::HotelContext;
//!
//! let store = InMemoryBookingStore::new();
//! let ctx = HotelContext::new("hotel-1".into(), "user-1".into(), vec![], vec![]);
//! let bookings = store.list_bookings(&ctx, &BookingFilter::default()).await?;
//! ```

pub mod changes;
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use changes::*;
pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{
    DemoData, InMemoryBookingStore, InMemoryContactRequestStore, InMemoryExportLogStore,
    InMemoryInventoryStore, InMemoryPaymentStore, InMemoryPurchaseOrderStore,
    InMemoryReportStore, InMemoryRoomStore, InMemoryStaffStore, InMemoryStatsStore,
    InMemoryUserStore, demo_data,
};

pub use postgres::{
    PgBookingStore, PgContactRequestStore, PgExportLogStore, PgInventoryStore, PgPaymentStore,
    PgPurchaseOrderStore, PgReportStore, PgRoomStore, PgStaffStore, PgStatsStore, PgUserStore,
};
