use domain::{PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 支付记录创建请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub guest_name: String,
    pub room_number: String,
    pub amount: f64,
    pub payment_method: String,
    pub status: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub transaction_at_ms: Option<i64>,
}

/// 支付列表过滤参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub status: Option<String>,
    pub method: Option<String>,
}

/// 支付记录返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
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

/// 支付汇总。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummaryDto {
    pub total_transactions: u64,
    pub completed_amount: f64,
    pub refunded_amount: f64,
    pub pending_count: u64,
    pub failed_count: u64,
    pub amount_by_method: BTreeMap<String, f64>,
    pub count_by_status: BTreeMap<String, u64>,
    pub completed_amount_formatted: String,
}
