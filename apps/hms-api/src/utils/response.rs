//! HTTP 响应辅助函数
//!
//! 所有响应都使用 `ApiResponse` 信封；错误码与状态码一一对应：
//! - `AUTH.UNAUTHORIZED` 401 / `AUTH.FORBIDDEN` 403
//! - `INVALID.REQUEST` 400 / `RESOURCE.NOT_FOUND` 404 / `RESOURCE.CONFLICT` 409
//! - `INTERNAL.ERROR` 500

use api_contract::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hms_auth::AuthError;
use hms_storage::{StorageError, StorageErrorKind};
use serde::Serialize;

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success_with_message(data, message)),
    )
        .into_response()
}

pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error("AUTH.UNAUTHORIZED", "unauthorized")),
    )
        .into_response()
}

pub fn forbidden_error() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error("AUTH.FORBIDDEN", "forbidden")),
    )
        .into_response()
}

pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

pub fn conflict_error(message: impl Into<String>) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ApiResponse::<()>::error("RESOURCE.CONFLICT", message.into())),
    )
        .into_response()
}

pub fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message.into())),
    )
        .into_response()
}

pub fn internal_auth_error(err: AuthError) -> Response {
    internal_error(err.to_string())
}

/// 存储错误按类别映射：冲突 409，与现有数据不一致 400，其余 500。
pub fn storage_error(err: StorageError) -> Response {
    match err.kind() {
        StorageErrorKind::Conflict => conflict_error(err.to_string()),
        StorageErrorKind::Invalid => bad_request_error(err.to_string()),
        StorageErrorKind::Internal => {
            tracing::error!(error = %err, "storage operation failed");
            internal_error(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_maps_kind_to_status() {
        assert_eq!(
            storage_error(StorageError::conflict("room number taken")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            storage_error(StorageError::invalid("stock below zero")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            storage_error(StorageError::new("connection reset")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
