//! 稳定的 DTO 与 API 响应契约。
//!
//! 所有接口返回统一封装 `{success, message, data}`，失败时附带 `code`。
//! 请求体中的枚举字段使用字符串，由 handler 解析并返回 400；
//! 响应体直接使用领域枚举序列化。

mod analytics;
mod auth;
mod bookings;
mod contact;
mod inventory;
mod payments;
mod reports;
mod rooms;
mod staff;

pub use analytics::*;
pub use auth::*;
pub use bookings::*;
pub use contact::*;
pub use inventory::*;
pub use payments::*;
pub use reports::*;
pub use rooms::*;
pub use staff::*;

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, "ok")
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            code: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code: Some(code.into()),
        }
    }
}

/// 分页/条数限制查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// 按状态过滤的查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// 状态更新请求体（预订、支付、采购单、联系申请共用）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// 进程内计数指标快照。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub bookings_created: u64,
    pub booking_status_changes: u64,
    pub contact_requests_submitted: u64,
    pub contact_requests_rejected: u64,
    pub reports_generated: u64,
    pub reports_exported: u64,
    pub dashboard_computations: u64,
    pub dashboard_cache_hits: u64,
    pub dashboard_fallbacks: u64,
    pub change_events_published: u64,
}
