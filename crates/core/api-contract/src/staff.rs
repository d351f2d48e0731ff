use domain::{StaffRole, StaffStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 紧急联系人。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactDto {
    pub name: String,
    pub phone: String,
    pub relationship: Option<String>,
}

/// 员工创建请求体。
///
/// `permissions` 缺省时按角色默认权限表填充。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub department: String,
    pub position: String,
    pub status: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub salary: f64,
    pub emergency_contact: Option<EmergencyContactDto>,
    pub hired_at: Option<String>,
}

/// 员工更新请求体。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub salary: Option<f64>,
    pub emergency_contact: Option<EmergencyContactDto>,
}

/// 员工返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub staff_id: String,
    pub hotel_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub department: String,
    pub position: String,
    pub status: StaffStatus,
    pub permissions: Vec<String>,
    pub salary: f64,
    pub emergency_contact: Option<EmergencyContactDto>,
    pub hired_at: Option<String>,
}

/// 员工统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummaryDto {
    pub total: u64,
    pub active: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_department: BTreeMap<String, u64>,
    pub monthly_payroll: f64,
}

/// 角色默认权限。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionsDto {
    pub role: StaffRole,
    pub permissions: Vec<String>,
}
