//! 联系 / 取消申请。
//!
//! 提交流程：字段校验 → 预订号格式 → 在 `bookings` 与 `booking_archive` 中查找
//! → 校验预订归属当前账户 → 写入 `pending` 状态的申请并生成 `REQ-` 单号。
//! 任一步失败都以内联错误信息返回，不写入任何数据。

mod validation;

pub use validation::normalize_reference;

use domain::timestamp::now_ms;
use domain::{
    ContactStatus, HotelContext, InquiryType, generate_request_reference,
    is_valid_booking_reference,
};
use hms_storage::{
    BookingRecord, BookingStore, ContactRequestRecord, ContactRequestStore, StorageError,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 联系申请错误；除 `Storage` 外都属于调用方可修正的输入问题。
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("A booking reference is required for {0} requests")]
    ReferenceRequired(InquiryType),
    #[error("Invalid booking reference format")]
    InvalidReference,
    #[error("Booking reference not found")]
    BookingNotFound,
    #[error("This booking does not belong to your account")]
    NotOwner,
    #[error("contact request not found")]
    NotFound,
    #[error("contact request is already {0}")]
    AlreadyClosed(ContactStatus),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 提交内容。
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: InquiryType,
    pub booking_reference: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

pub struct ContactService {
    bookings: Arc<dyn BookingStore>,
    requests: Arc<dyn ContactRequestStore>,
}

impl ContactService {
    pub fn new(bookings: Arc<dyn BookingStore>, requests: Arc<dyn ContactRequestStore>) -> Self {
        Self { bookings, requests }
    }

    pub async fn submit(
        &self,
        ctx: &HotelContext,
        submission: ContactSubmission,
    ) -> Result<ContactRequestRecord, ContactError> {
        let reference = match self.check(ctx, &submission).await {
            Ok(reference) => reference,
            Err(err) => {
                if !matches!(err, ContactError::Storage(_)) {
                    hms_telemetry::record_contact_request_rejected();
                }
                warn!(hotel_id = %ctx.hotel_id, user_id = %ctx.user_id, error = %err, "contact request rejected");
                return Err(err);
            }
        };

        let now = now_ms();
        let record = ContactRequestRecord {
            request_id: format!("contact-{}", Uuid::new_v4()),
            hotel_id: ctx.hotel_id.clone(),
            reference_number: generate_request_reference(now),
            user_id: ctx.user_id.clone(),
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: non_empty(submission.phone),
            inquiry_type: submission.inquiry_type,
            booking_reference: reference,
            subject: non_empty(submission.subject),
            message: submission.message.trim().to_string(),
            status: ContactStatus::Pending,
            created_at_ms: now,
            updated_at_ms: now,
        };
        let saved = self.requests.create_contact_request(ctx, record).await?;
        hms_telemetry::record_contact_request_submitted();
        info!(
            hotel_id = %ctx.hotel_id,
            reference_number = %saved.reference_number,
            inquiry_type = saved.inquiry_type.as_str(),
            "contact request submitted"
        );
        Ok(saved)
    }

    pub async fn list(
        &self,
        ctx: &HotelContext,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRequestRecord>, ContactError> {
        Ok(self.requests.list_contact_requests(ctx, status).await?)
    }

    pub async fn get(
        &self,
        ctx: &HotelContext,
        request_id: &str,
    ) -> Result<ContactRequestRecord, ContactError> {
        self.requests
            .find_contact_request(ctx, request_id)
            .await?
            .ok_or(ContactError::NotFound)
    }

    /// 更新处理状态；已解决或已取消的申请不再变更。
    pub async fn update_status(
        &self,
        ctx: &HotelContext,
        request_id: &str,
        status: ContactStatus,
    ) -> Result<ContactRequestRecord, ContactError> {
        let current = self.get(ctx, request_id).await?;
        if current.status == status {
            return Ok(current);
        }
        if current.status.is_terminal() {
            return Err(ContactError::AlreadyClosed(current.status));
        }
        self.requests
            .update_contact_status(ctx, request_id, status, now_ms())
            .await?
            .ok_or(ContactError::NotFound)
    }

    /// 返回规范化后的预订号（未填写时为 `None`）。
    async fn check(
        &self,
        ctx: &HotelContext,
        submission: &ContactSubmission,
    ) -> Result<Option<String>, ContactError> {
        validation::check_fields(submission)?;
        let Some(reference) = normalize_reference(submission.booking_reference.as_deref()) else {
            if submission.inquiry_type.requires_booking_reference() {
                return Err(ContactError::ReferenceRequired(submission.inquiry_type));
            }
            return Ok(None);
        };
        if !is_valid_booking_reference(&reference) {
            return Err(ContactError::InvalidReference);
        }
        let booking = self
            .lookup_booking(ctx, &reference)
            .await?
            .ok_or(ContactError::BookingNotFound)?;
        if booking.guest_user_id != ctx.user_id {
            return Err(ContactError::NotOwner);
        }
        Ok(Some(reference))
    }

    async fn lookup_booking(
        &self,
        ctx: &HotelContext,
        reference: &str,
    ) -> Result<Option<BookingRecord>, StorageError> {
        if let Some(booking) = self.bookings.find_booking(ctx, reference).await? {
            return Ok(Some(booking));
        }
        self.bookings.find_archived_booking(ctx, reference).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
