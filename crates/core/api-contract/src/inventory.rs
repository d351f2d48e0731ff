use domain::{InventoryActivityKind, PurchaseOrderStatus};
use serde::{Deserialize, Serialize};

/// 库存物品创建请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
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

/// 库存物品更新请求体（库存数量通过 adjust 接口修改）。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub reorder_level: Option<i64>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// 库存调整请求体：正数入库，负数出库。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    pub delta: i64,
    pub kind: Option<String>,
}

/// 库存物品返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
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
    pub low_stock: bool,
}

/// 库存变动返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryActivityDto {
    pub activity_id: String,
    pub item_id: String,
    pub item_name: String,
    pub kind: InventoryActivityKind,
    pub quantity_delta: i64,
    pub stock_after: i64,
    pub actor_id: String,
    pub at_ms: i64,
}

/// 库存看板统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDashboardStatsDto {
    pub total_items: u64,
    pub low_stock_items: u64,
    pub out_of_stock_items: u64,
    pub category_count: u64,
    pub total_value: f64,
    pub total_value_formatted: String,
}

/// 库存看板图表（按分类）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryChartPointDto {
    pub category: String,
    pub item_count: u64,
    pub stock: i64,
    pub value: f64,
}

/// 采购单创建请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderRequest {
    pub supplier: String,
    pub description: Option<String>,
    pub total_amount: f64,
    pub ordered_at_ms: Option<i64>,
}

/// 采购单返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDto {
    pub order_id: String,
    pub hotel_id: String,
    pub supplier: String,
    pub description: Option<String>,
    pub total_amount: f64,
    pub status: PurchaseOrderStatus,
    pub ordered_at_ms: i64,
}
