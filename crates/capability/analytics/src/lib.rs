//! 经营指标计算：看板统计、周营收、利润、库存/支付/员工汇总。
//!
//! 纯函数只依赖传入的记录与时间，便于测试；`DashboardService`
//! 负责从存储读取并按“缓存 → 统计文档 → 重新计算 → 兜底”顺序解析。

mod currency;
mod dashboard;
mod profit;
mod revenue;
mod service;
mod summary;

pub use currency::format_currency;
pub use dashboard::{aggregate_dashboard, occupancy_rate};
pub use profit::{ExpenseSplit, ProfitSummary, compute_profit};
pub use revenue::{
    RevenueEntry, WeekBucket, WeeklyRevenue, growth_percent, week_windows, weekly_revenue,
};
pub use service::{DashboardService, DashboardSnapshot, DashboardSources, StatsSource};
pub use summary::{
    CategoryStock, InventoryOverview, PaymentSummary, StaffSummary, inventory_chart,
    inventory_overview, payment_summary, staff_summary,
};

use hms_storage::StorageError;

/// 指标计算错误。
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    #[error("invalid expense split: {0}")]
    InvalidSplit(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
