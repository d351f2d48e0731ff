//! 员工 handlers
//!
//! - `GET/POST /staff`、`GET/PUT/DELETE /staff/:staff_id`
//! - `GET /staff/summary`：按状态、部门计数与在职月薪合计
//! - `GET /staff/roles/:role/permissions`：角色默认权限
//!
//! 创建时未给出权限则使用角色默认权限；只改角色不改权限时同样重置为新角色的默认权限。

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::{emergency_contact_from_dto, staff_summary_to_dto, staff_to_dto};
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{
    blank_to_none, ensure_non_negative, normalize_email, normalize_optional, normalize_required,
    parse_enum, parse_optional_enum,
};
use api_contract::{
    CreateStaffRequest, RolePermissionsDto, StaffDto, UpdateStaffRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use domain::permissions::{self, default_permissions, is_known_permission};
use domain::{StaffRole, StaffStatus};
use hms_analytics::staff_summary as summarize_staff;
use hms_storage::{ChangeKind, Collection, StaffRecord, StaffUpdate};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct StaffPath {
    staff_id: String,
}

#[derive(serde::Deserialize)]
pub struct RolePath {
    role: String,
}

fn role_defaults(role: StaffRole) -> Vec<String> {
    default_permissions(role)
        .iter()
        .map(|code| (*code).to_string())
        .collect()
}

/// 去重并校验权限码。
fn checked_permissions(codes: Vec<String>) -> Result<Vec<String>, Response> {
    let mut checked: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_string();
        if !is_known_permission(&code) {
            return Err(bad_request_error(format!("unknown permission: {code}")));
        }
        if !checked.contains(&code) {
            checked.push(code);
        }
    }
    Ok(checked)
}

pub async fn list_staff(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.staff_store.list_staff(&ctx).await {
        Ok(members) => {
            let data: Vec<StaffDto> = members.into_iter().map(staff_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateStaffRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let email = match normalize_email(req.email, "email") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let role = match parse_enum::<StaffRole>(&req.role, "role") {
        Ok(role) => role,
        Err(response) => return response,
    };
    let department = match normalize_required(req.department, "department") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let position = match normalize_required(req.position, "position") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<StaffStatus>(req.status.as_deref(), "status") {
        Ok(status) => status.unwrap_or(StaffStatus::Active),
        Err(response) => return response,
    };
    let permissions = match req.permissions {
        Some(codes) => match checked_permissions(codes) {
            Ok(codes) => codes,
            Err(response) => return response,
        },
        None => role_defaults(role),
    };
    let salary = match ensure_non_negative(req.salary, "salary") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = StaffRecord {
        staff_id: format!("staff-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        name,
        email,
        phone: blank_to_none(req.phone),
        role,
        department,
        position,
        status,
        permissions,
        salary,
        emergency_contact: req.emergency_contact.map(emergency_contact_from_dto),
        hired_at: blank_to_none(req.hired_at),
    };
    match state.staff_store.create_staff(&ctx, record).await {
        Ok(member) => {
            state.publish_change(&ctx, Collection::Staff, &member.staff_id, ChangeKind::Created);
            ok(staff_to_dto(member))
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_staff(
    State(state): State<AppState>,
    Path(path): Path<StaffPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.staff_store.find_staff(&ctx, &path.staff_id).await {
        Ok(Some(member)) => ok(staff_to_dto(member)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_staff(
    State(state): State<AppState>,
    Path(path): Path<StaffPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateStaffRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let name = match normalize_optional(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let email = match req.email {
        Some(email) => match normalize_email(email, "email") {
            Ok(value) => Some(value),
            Err(response) => return response,
        },
        None => None,
    };
    let role = match parse_optional_enum::<StaffRole>(req.role.as_deref(), "role") {
        Ok(role) => role,
        Err(response) => return response,
    };
    let department = match normalize_optional(req.department, "department") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let position = match normalize_optional(req.position, "position") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<StaffStatus>(req.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let permissions = match req.permissions {
        Some(codes) => match checked_permissions(codes) {
            Ok(codes) => Some(codes),
            Err(response) => return response,
        },
        None => role.map(role_defaults),
    };
    let salary = match req.salary {
        Some(salary) => match ensure_non_negative(salary, "salary") {
            Ok(value) => Some(value),
            Err(response) => return response,
        },
        None => None,
    };
    let update = StaffUpdate {
        name,
        email,
        phone: req.phone.map(|value| value.trim().to_string()),
        role,
        department,
        position,
        status,
        permissions,
        salary,
        emergency_contact: req.emergency_contact.map(emergency_contact_from_dto),
    };
    match state
        .staff_store
        .update_staff(&ctx, &path.staff_id, update)
        .await
    {
        Ok(Some(member)) => {
            state.publish_change(&ctx, Collection::Staff, &member.staff_id, ChangeKind::Updated);
            ok(staff_to_dto(member))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_staff(
    State(state): State<AppState>,
    Path(path): Path<StaffPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.staff_store.delete_staff(&ctx, &path.staff_id).await {
        Ok(true) => {
            state.publish_change(&ctx, Collection::Staff, &path.staff_id, ChangeKind::Deleted);
            ok(())
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn staff_summary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::STAFF_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.staff_store.list_staff(&ctx).await {
        Ok(members) => ok(staff_summary_to_dto(summarize_staff(&members))),
        Err(err) => storage_error(err),
    }
}

pub async fn role_permissions(
    State(state): State<AppState>,
    Path(path): Path<RolePath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers, permissions::STAFF_READ) {
        return response;
    }
    let role = match parse_enum::<StaffRole>(&path.role, "role") {
        Ok(role) => role,
        Err(response) => return response,
    };
    ok(RolePermissionsDto {
        role,
        permissions: role_defaults(role),
    })
}
