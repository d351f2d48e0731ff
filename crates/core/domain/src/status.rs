//! 状态与分类枚举。
//!
//! 所有枚举都以字符串形式出现在 API 和数据库中，
//! `as_str` 与 `FromStr` 互为逆操作。

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(DomainError::UnknownValue {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// 预订状态。
    BookingStatus, "booking status" {
        Pending => "pending",
        Confirmed => "confirmed",
        CheckedIn => "checked-in",
        Cancelled => "cancelled",
        Completed => "completed",
    }
}

impl BookingStatus {
    /// 校验状态迁移。
    ///
    /// pending → confirmed|cancelled，confirmed → checked-in|cancelled，
    /// checked-in → completed；相同状态视为无操作。
    pub fn transition_to(self, next: BookingStatus) -> Result<BookingStatus, DomainError> {
        use BookingStatus::*;
        let allowed = self == next
            || matches!(
                (self, next),
                (Pending, Confirmed)
                    | (Pending, Cancelled)
                    | (Confirmed, CheckedIn)
                    | (Confirmed, Cancelled)
                    | (CheckedIn, Completed)
            );
        if allowed {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// 已结束的预订（可归档）。
    pub fn is_closed(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

string_enum! {
    /// 房间状态。
    RoomStatus, "room status" {
        Available => "available",
        Occupied => "occupied",
        Maintenance => "maintenance",
        Cleaning => "cleaning",
    }
}

string_enum! {
    /// 支付方式。
    PaymentMethod, "payment method" {
        Cash => "cash",
        Card => "card",
        Digital => "digital",
        BankTransfer => "bank_transfer",
    }
}

string_enum! {
    /// 支付状态。
    PaymentStatus, "payment status" {
        Completed => "completed",
        Pending => "pending",
        Failed => "failed",
        Refunded => "refunded",
    }
}

string_enum! {
    /// 员工角色。
    StaffRole, "staff role" {
        Admin => "admin",
        Manager => "manager",
        Receptionist => "receptionist",
        Housekeeping => "housekeeping",
        Maintenance => "maintenance",
        Chef => "chef",
        Accountant => "accountant",
    }
}

string_enum! {
    /// 员工在岗状态。
    StaffStatus, "staff status" {
        Active => "active",
        OnLeave => "on-leave",
        Inactive => "inactive",
    }
}

string_enum! {
    /// 联系申请类型。
    InquiryType, "inquiry type" {
        General => "general",
        Reservation => "reservation",
        Cancellation => "cancellation",
        Modification => "modification",
        Feedback => "feedback",
        Complaint => "complaint",
    }
}

impl InquiryType {
    /// 取消/修改类申请必须携带预订号。
    pub fn requires_booking_reference(self) -> bool {
        matches!(self, InquiryType::Cancellation | InquiryType::Modification)
    }
}

string_enum! {
    /// 联系申请处理状态。
    ContactStatus, "contact status" {
        Pending => "pending",
        InProgress => "in-progress",
        Resolved => "resolved",
        Cancelled => "cancelled",
    }
}

impl ContactStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ContactStatus::Resolved | ContactStatus::Cancelled)
    }
}

string_enum! {
    /// 报表类型。
    ReportType, "report type" {
        Occupancy => "occupancy",
        Revenue => "revenue",
        Inventory => "inventory",
        Staff => "staff",
        Payments => "payments",
    }
}

string_enum! {
    /// 库存变动类型。
    InventoryActivityKind, "inventory activity" {
        Created => "created",
        Restocked => "restocked",
        Consumed => "consumed",
        Adjusted => "adjusted",
        Deleted => "deleted",
    }
}

string_enum! {
    /// 采购单状态。
    PurchaseOrderStatus, "purchase order status" {
        Requested => "requested",
        Approved => "approved",
        Received => "received",
        Cancelled => "cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_round_trips_kebab_case() {
        assert_eq!("checked-in".parse::<BookingStatus>(), Ok(BookingStatus::CheckedIn));
        assert_eq!(BookingStatus::CheckedIn.as_str(), "checked-in");
        assert_eq!(" Confirmed ".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = "lost".parse::<PaymentStatus>().expect_err("unknown");
        assert_eq!(err.to_string(), "unknown payment status: lost");
    }

    #[test]
    fn booking_transitions_follow_lifecycle() {
        use BookingStatus::*;
        assert_eq!(Pending.transition_to(Confirmed), Ok(Confirmed));
        assert_eq!(Confirmed.transition_to(CheckedIn), Ok(CheckedIn));
        assert_eq!(CheckedIn.transition_to(Completed), Ok(Completed));
        assert_eq!(Cancelled.transition_to(Cancelled), Ok(Cancelled));
        assert!(Pending.transition_to(Completed).is_err());
        assert!(CheckedIn.transition_to(Cancelled).is_err());
        assert!(Completed.transition_to(Pending).is_err());
    }

    #[test]
    fn payment_method_uses_snake_case() {
        let value = serde_json::to_value(PaymentMethod::BankTransfer).expect("serialize");
        assert_eq!(value, serde_json::json!("bank_transfer"));
    }

    #[test]
    fn only_cancellation_and_modification_need_reference() {
        assert!(InquiryType::Cancellation.requires_booking_reference());
        assert!(InquiryType::Modification.requires_booking_reference());
        assert!(!InquiryType::General.requires_booking_reference());
        assert!(!InquiryType::Complaint.requires_booking_reference());
    }
}
