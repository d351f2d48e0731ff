pub mod permissions;
pub mod reference;
pub mod status;
pub mod timestamp;

pub use reference::{
    generate_booking_reference, generate_request_reference, is_valid_booking_reference,
    is_valid_email,
};
pub use status::{
    BookingStatus, ContactStatus, InquiryType, InventoryActivityKind, PaymentMethod,
    PaymentStatus, PurchaseOrderStatus, ReportType, RoomStatus, StaffRole, StaffStatus,
};
pub use timestamp::DocumentTimestamp;

/// 领域层错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

/// 酒店上下文：所有模块共享的执行上下文。
///
/// `hotel_id` 是数据隔离边界，所有存储操作都按它过滤。
#[derive(Debug, Clone)]
pub struct HotelContext {
    pub hotel_id: String,
    pub user_id: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl HotelContext {
    /// 构造显式身份与权限范围的上下文。
    pub fn new(
        hotel_id: impl Into<String>,
        user_id: impl Into<String>,
        roles: Vec<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            user_id: user_id.into(),
            roles,
            permissions,
        }
    }

    /// 是否持有指定权限码。
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|item| item == code)
    }
}

impl Default for HotelContext {
    /// 空上下文（仅用于登录前查询或测试）。
    fn default() -> Self {
        Self {
            hotel_id: "".to_string(),
            user_id: "".to_string(),
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }
}
