use serde::{Deserialize, Serialize};

/// 看板统计返回结构。
///
/// `source` 取值：document / cached / computed / fallback。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
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
    pub total_revenue_formatted: String,
    pub inventory_items: u64,
    pub low_stock_items: u64,
    pub total_staff: u64,
    pub active_staff: u64,
    pub source: String,
    pub updated_at_ms: i64,
}

/// 单周营收。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRevenueDto {
    pub label: String,
    pub start: String,
    pub end: String,
    pub revenue: f64,
    pub revenue_formatted: String,
    pub percentage: u32,
    pub bookings: u64,
}

/// 近四周营收与环比增长。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRevenueDto {
    pub weeks: Vec<WeekRevenueDto>,
    pub total: f64,
    pub current_week: f64,
    pub previous_week: f64,
    pub growth_percent: i64,
}

/// 利润分析查询参数（日期为 `YYYY-MM-DD`，缺省为最近 30 天）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 支出分项。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLineDto {
    pub category: String,
    pub amount: f64,
}

/// 利润分析返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitDto {
    pub from: String,
    pub to: String,
    pub revenue: f64,
    pub procurement: f64,
    pub payroll: f64,
    pub expenses: f64,
    pub profit: f64,
    pub margin_percent: i64,
    pub estimated_breakdown: Vec<ExpenseLineDto>,
    pub profit_formatted: String,
}
