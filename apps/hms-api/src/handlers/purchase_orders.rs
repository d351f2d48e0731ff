//! 采购单 handlers：`GET/POST /purchase-orders`、`PUT /purchase-orders/:order_id/status`
//!
//! 采购单是利润分析中采购支出的来源。

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::purchase_order_to_dto;
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{blank_to_none, ensure_non_negative, normalize_required, parse_enum};
use api_contract::{CreatePurchaseOrderRequest, PurchaseOrderDto, UpdateStatusRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use domain::timestamp::now_ms;
use domain::{PurchaseOrderStatus, permissions};
use hms_storage::{ChangeKind, Collection, PurchaseOrderRecord};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct OrderPath {
    order_id: String,
}

pub async fn list_orders(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.purchase_order_store.list_orders(&ctx).await {
        Ok(orders) => {
            let data: Vec<PurchaseOrderDto> =
                orders.into_iter().map(purchase_order_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePurchaseOrderRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let supplier = match normalize_required(req.supplier, "supplier") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let total_amount = match ensure_non_negative(req.total_amount, "totalAmount") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = PurchaseOrderRecord {
        order_id: format!("po-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        supplier,
        description: blank_to_none(req.description),
        total_amount,
        status: PurchaseOrderStatus::Requested,
        ordered_at_ms: req.ordered_at_ms.unwrap_or_else(now_ms),
    };
    match state.purchase_order_store.create_order(&ctx, record).await {
        Ok(order) => {
            state.publish_change(&ctx, Collection::PurchaseOrders, &order.order_id, ChangeKind::Created);
            ok(purchase_order_to_dto(order))
        }
        Err(err) => storage_error(err),
    }
}

/// 已取消或已收货的采购单不再变更状态。
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(path): Path<OrderPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let status = match parse_enum::<PurchaseOrderStatus>(&req.status, "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let current = match state.purchase_order_store.list_orders(&ctx).await {
        Ok(orders) => orders.into_iter().find(|order| order.order_id == path.order_id),
        Err(err) => return storage_error(err),
    };
    let Some(current) = current else {
        return not_found_error();
    };
    if current.status != status
        && matches!(
            current.status,
            PurchaseOrderStatus::Cancelled | PurchaseOrderStatus::Received
        )
    {
        return bad_request_error(format!("purchase order is already {}", current.status));
    }
    match state
        .purchase_order_store
        .update_order_status(&ctx, &path.order_id, status)
        .await
    {
        Ok(Some(order)) => {
            state.publish_change(&ctx, Collection::PurchaseOrders, &order.order_id, ChangeKind::Updated);
            ok(purchase_order_to_dto(order))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
