use domain::{BookingStatus, DocumentTimestamp};
use serde::{Deserialize, Serialize};

/// 预订创建请求体。
///
/// `guestUserId` 为空时预订归属当前登录用户。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub guest_user_id: Option<String>,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub room_number: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub total_amount: f64,
    pub status: Option<String>,
}

/// 预订更新请求体（状态通过独立接口修改）。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub room_number: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub total_amount: Option<f64>,
}

/// 导入的原始预订文档，日期字段形态不固定。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBookingDocument {
    pub id: Option<String>,
    pub guest_user_id: Option<String>,
    pub guest_name: String,
    pub guest_email: Option<String>,
    #[serde(default)]
    pub room_number: String,
    pub check_in_date: DocumentTimestamp,
    pub check_out_date: Option<DocumentTimestamp>,
    pub status: String,
    pub total_amount: f64,
}

/// 批量导入请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBookingsRequest {
    pub documents: Vec<ImportBookingDocument>,
}

/// 批量导入结果。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBookingsResponse {
    pub imported: usize,
    pub skipped: Vec<String>,
}

/// 预订返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub booking_id: String,
    pub hotel_id: String,
    pub guest_user_id: String,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub room_number: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub archived: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
