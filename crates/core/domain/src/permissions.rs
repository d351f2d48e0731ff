//! 权限码与角色默认权限表。

use crate::status::StaffRole;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_GUEST: &str = "guest";

pub const BOOKING_READ: &str = "BOOKING.READ";
pub const BOOKING_WRITE: &str = "BOOKING.WRITE";
pub const ROOM_READ: &str = "ROOM.READ";
pub const ROOM_WRITE: &str = "ROOM.WRITE";
pub const INVENTORY_READ: &str = "INVENTORY.READ";
pub const INVENTORY_WRITE: &str = "INVENTORY.WRITE";
pub const STAFF_READ: &str = "STAFF.READ";
pub const STAFF_WRITE: &str = "STAFF.WRITE";
pub const PAYMENT_READ: &str = "PAYMENT.READ";
pub const PAYMENT_WRITE: &str = "PAYMENT.WRITE";
pub const REPORT_READ: &str = "REPORT.READ";
pub const REPORT_WRITE: &str = "REPORT.WRITE";
pub const REVENUE_READ: &str = "REVENUE.READ";
pub const DASHBOARD_READ: &str = "DASHBOARD.READ";
pub const CONTACT_SUBMIT: &str = "CONTACT.SUBMIT";
pub const CONTACT_MANAGE: &str = "CONTACT.MANAGE";
pub const SYSTEM_METRICS_READ: &str = "SYSTEM.METRICS.READ";

/// 全部权限码（admin 账户默认持有）。
pub const PERMISSION_CODES: &[&str] = &[
    BOOKING_READ,
    BOOKING_WRITE,
    ROOM_READ,
    ROOM_WRITE,
    INVENTORY_READ,
    INVENTORY_WRITE,
    STAFF_READ,
    STAFF_WRITE,
    PAYMENT_READ,
    PAYMENT_WRITE,
    REPORT_READ,
    REPORT_WRITE,
    REVENUE_READ,
    DASHBOARD_READ,
    CONTACT_SUBMIT,
    CONTACT_MANAGE,
    SYSTEM_METRICS_READ,
];

/// 访客账户权限。
pub const GUEST_PERMISSIONS: &[&str] = &[CONTACT_SUBMIT];

const MANAGER_PERMISSIONS: &[&str] = &[
    BOOKING_READ,
    BOOKING_WRITE,
    ROOM_READ,
    ROOM_WRITE,
    INVENTORY_READ,
    INVENTORY_WRITE,
    STAFF_READ,
    STAFF_WRITE,
    PAYMENT_READ,
    REPORT_READ,
    REPORT_WRITE,
    REVENUE_READ,
    DASHBOARD_READ,
    CONTACT_MANAGE,
];

const RECEPTIONIST_PERMISSIONS: &[&str] = &[
    BOOKING_READ,
    BOOKING_WRITE,
    ROOM_READ,
    PAYMENT_READ,
    PAYMENT_WRITE,
    DASHBOARD_READ,
    CONTACT_MANAGE,
];

const HOUSEKEEPING_PERMISSIONS: &[&str] = &[ROOM_READ, ROOM_WRITE, INVENTORY_READ];

const MAINTENANCE_PERMISSIONS: &[&str] = &[ROOM_READ, ROOM_WRITE, INVENTORY_READ, INVENTORY_WRITE];

const CHEF_PERMISSIONS: &[&str] = &[INVENTORY_READ, INVENTORY_WRITE];

const ACCOUNTANT_PERMISSIONS: &[&str] = &[
    PAYMENT_READ,
    PAYMENT_WRITE,
    REPORT_READ,
    REPORT_WRITE,
    REVENUE_READ,
    DASHBOARD_READ,
];

/// 角色默认权限（静态查找表）。
pub fn default_permissions(role: StaffRole) -> &'static [&'static str] {
    match role {
        StaffRole::Admin => PERMISSION_CODES,
        StaffRole::Manager => MANAGER_PERMISSIONS,
        StaffRole::Receptionist => RECEPTIONIST_PERMISSIONS,
        StaffRole::Housekeeping => HOUSEKEEPING_PERMISSIONS,
        StaffRole::Maintenance => MAINTENANCE_PERMISSIONS,
        StaffRole::Chef => CHEF_PERMISSIONS,
        StaffRole::Accountant => ACCOUNTANT_PERMISSIONS,
    }
}

/// 校验权限码是否已知。
pub fn is_known_permission(code: &str) -> bool {
    PERMISSION_CODES.contains(&code)
}
