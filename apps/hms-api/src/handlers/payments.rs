//! 支付 handlers
//!
//! - `GET /payments?status=&method=`、`POST /payments`
//! - `GET /payments/:payment_id`、`PUT /payments/:payment_id/status`
//! - `GET /payments/summary`

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::{payment_summary_to_dto, payment_to_dto};
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{
    blank_to_none, ensure_non_negative, normalize_required, parse_enum, parse_optional_enum,
};
use api_contract::{CreatePaymentRequest, PaymentDto, PaymentQuery, UpdateStatusRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use domain::timestamp::now_ms;
use domain::{PaymentMethod, PaymentStatus, permissions};
use hms_analytics::payment_summary as summarize_payments;
use hms_storage::{ChangeKind, Collection, PaymentFilter, PaymentRecord};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct PaymentPath {
    payment_id: String,
}

/// 退款只能来自已完成的支付；失败/退款后的支付不再变化。
fn check_payment_transition(current: PaymentStatus, next: PaymentStatus) -> Result<(), Response> {
    use PaymentStatus::*;
    let allowed = current == next
        || matches!(
            (current, next),
            (Pending, Completed) | (Pending, Failed) | (Completed, Refunded)
        );
    if allowed {
        Ok(())
    } else {
        Err(bad_request_error(format!(
            "invalid payment status transition: {current} -> {next}"
        )))
    }
}

pub async fn list_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PaymentQuery>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::PAYMENT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<PaymentStatus>(query.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let method = match parse_optional_enum::<PaymentMethod>(query.method.as_deref(), "method") {
        Ok(method) => method,
        Err(response) => return response,
    };
    let filter = PaymentFilter { status, method };
    match state.payment_store.list_payments(&ctx, &filter).await {
        Ok(payments) => {
            let data: Vec<PaymentDto> = payments.into_iter().map(payment_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePaymentRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::PAYMENT_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let guest_name = match normalize_required(req.guest_name, "guestName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let room_number = match normalize_required(req.room_number, "roomNumber") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let amount = match ensure_non_negative(req.amount, "amount") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let payment_method = match parse_enum::<PaymentMethod>(&req.payment_method, "paymentMethod") {
        Ok(method) => method,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<PaymentStatus>(req.status.as_deref(), "status") {
        Ok(status) => status.unwrap_or(PaymentStatus::Pending),
        Err(response) => return response,
    };
    let now = now_ms();
    let record = PaymentRecord {
        payment_id: format!("pay-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        guest_name,
        room_number,
        amount,
        payment_method,
        status,
        transaction_at_ms: req.transaction_at_ms.unwrap_or(now),
        reference: blank_to_none(req.reference).unwrap_or_else(|| format!("TXN-{now}")),
        description: blank_to_none(req.description),
    };
    match state.payment_store.create_payment(&ctx, record).await {
        Ok(payment) => {
            state.publish_change(&ctx, Collection::Payments, &payment.payment_id, ChangeKind::Created);
            ok(payment_to_dto(payment))
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(path): Path<PaymentPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::PAYMENT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.payment_store.find_payment(&ctx, &path.payment_id).await {
        Ok(Some(payment)) => ok(payment_to_dto(payment)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(path): Path<PaymentPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::PAYMENT_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let next = match parse_enum::<PaymentStatus>(&req.status, "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let current = match state.payment_store.find_payment(&ctx, &path.payment_id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    if let Err(response) = check_payment_transition(current.status, next) {
        return response;
    }
    match state
        .payment_store
        .update_payment_status(&ctx, &path.payment_id, next)
        .await
    {
        Ok(Some(payment)) => {
            state.publish_change(&ctx, Collection::Payments, &payment.payment_id, ChangeKind::Updated);
            ok(payment_to_dto(payment))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn payment_summary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::PAYMENT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state
        .payment_store
        .list_payments(&ctx, &PaymentFilter::default())
        .await
    {
        Ok(payments) => ok(payment_summary_to_dto(
            summarize_payments(&payments),
            &state.currency,
        )),
        Err(err) => storage_error(err),
    }
}
