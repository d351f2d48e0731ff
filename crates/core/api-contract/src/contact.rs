use domain::{ContactStatus, InquiryType};
use serde::{Deserialize, Serialize};

/// 联系/取消申请提交请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: String,
    pub booking_reference: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// 联系申请返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestDto {
    pub request_id: String,
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
