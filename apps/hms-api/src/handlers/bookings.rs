//! 预订 handlers
//!
//! - `GET/POST /bookings`、`GET/PUT/DELETE /bookings/:booking_id`
//! - `PUT /bookings/:booking_id/status`：按状态机流转
//! - `POST /bookings/:booking_id/archive`：已完成/已取消的预订移入归档集合
//! - `POST /bookings/import`：导入外部文档，日期字段可为毫秒、文本或 `{seconds, nanoseconds}`
//! - `GET /my/bookings`：当前用户自己的预订（含归档）

use crate::AppState;
use crate::middleware::{authorize, require_hotel_context};
use crate::utils::dto::booking_to_dto;
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{
    blank_to_none, ensure_non_negative, normalize_optional, normalize_required, parse_enum,
    parse_optional_enum,
};
use api_contract::{
    BookingDto, CreateBookingRequest, ImportBookingsRequest, ImportBookingsResponse, StatusQuery,
    UpdateBookingRequest, UpdateStatusRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use domain::permissions;
use domain::timestamp::{now_ms, parse_date_text};
use domain::{BookingStatus, HotelContext, generate_booking_reference};
use hms_storage::{
    BookingFilter, BookingRecord, BookingUpdate, ChangeKind, Collection, StorageErrorKind,
};
use tracing::{info, warn};

#[derive(serde::Deserialize)]
pub struct BookingPath {
    booking_id: String,
}

/// 入住日期必须可解析；离店日期不早于入住日期。
fn check_stay_dates(check_in: &str, check_out: &str) -> Result<(), Response> {
    let Some(check_in_at) = parse_date_text(check_in) else {
        return Err(bad_request_error("checkInDate is not a valid date"));
    };
    let Some(check_out_at) = parse_date_text(check_out) else {
        return Err(bad_request_error("checkOutDate is not a valid date"));
    };
    if check_out_at < check_in_at {
        return Err(bad_request_error("checkOutDate must not be before checkInDate"));
    }
    Ok(())
}

pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<BookingStatus>(query.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let filter = BookingFilter {
        status,
        guest_user_id: None,
    };
    match state.booking_store.list_bookings(&ctx, &filter).await {
        Ok(bookings) => {
            let data: Vec<BookingDto> = bookings.into_iter().map(booking_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
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
    let check_in_date = req.check_in_date.trim().to_string();
    let check_out_date = req.check_out_date.trim().to_string();
    if let Err(response) = check_stay_dates(&check_in_date, &check_out_date) {
        return response;
    }
    let total_amount = match ensure_non_negative(req.total_amount, "totalAmount") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<BookingStatus>(req.status.as_deref(), "status") {
        Ok(status) => status.unwrap_or(BookingStatus::Pending),
        Err(response) => return response,
    };

    let now = now_ms();
    let record = BookingRecord {
        booking_id: generate_booking_reference(now),
        hotel_id: ctx.hotel_id.clone(),
        guest_user_id: blank_to_none(req.guest_user_id).unwrap_or_else(|| ctx.user_id.clone()),
        guest_name,
        guest_email: blank_to_none(req.guest_email),
        room_number,
        check_in_date,
        check_out_date,
        status,
        total_amount,
        archived: false,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match state.booking_store.create_booking(&ctx, record).await {
        Ok(booking) => {
            hms_telemetry::record_bookings_created(1);
            state.publish_change(&ctx, Collection::Bookings, &booking.booking_id, ChangeKind::Created);
            info!(booking_id = %booking.booking_id, status = booking.status.as_str(), "booking created");
            ok(booking_to_dto(booking))
        }
        Err(err) => storage_error(err),
    }
}

/// 先查活跃集合，再查归档集合。
pub async fn get_booking(
    State(state): State<AppState>,
    Path(path): Path<BookingPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.booking_store.find_booking(&ctx, &path.booking_id).await {
        Ok(Some(booking)) => return ok(booking_to_dto(booking)),
        Ok(None) => {}
        Err(err) => return storage_error(err),
    }
    match state
        .booking_store
        .find_archived_booking(&ctx, &path.booking_id)
        .await
    {
        Ok(Some(booking)) => ok(booking_to_dto(booking)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(path): Path<BookingPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateBookingRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let current = match state.booking_store.find_booking(&ctx, &path.booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    let guest_name = match normalize_optional(req.guest_name, "guestName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let room_number = match normalize_optional(req.room_number, "roomNumber") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let check_in_date = req.check_in_date.map(|value| value.trim().to_string());
    let check_out_date = req.check_out_date.map(|value| value.trim().to_string());
    if check_in_date.is_some() || check_out_date.is_some() {
        let check_in = check_in_date.as_deref().unwrap_or(&current.check_in_date);
        let check_out = check_out_date.as_deref().unwrap_or(&current.check_out_date);
        if let Err(response) = check_stay_dates(check_in, check_out) {
            return response;
        }
    }
    let total_amount = match req.total_amount {
        Some(amount) => match ensure_non_negative(amount, "totalAmount") {
            Ok(value) => Some(value),
            Err(response) => return response,
        },
        None => None,
    };

    let update = BookingUpdate {
        guest_name,
        guest_email: req.guest_email.map(|value| value.trim().to_string()),
        room_number,
        check_in_date,
        check_out_date,
        total_amount,
        status: None,
        updated_at_ms: now_ms(),
    };
    match state
        .booking_store
        .update_booking(&ctx, &path.booking_id, update)
        .await
    {
        Ok(Some(booking)) => {
            state.publish_change(&ctx, Collection::Bookings, &booking.booking_id, ChangeKind::Updated);
            ok(booking_to_dto(booking))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(path): Path<BookingPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.booking_store.delete_booking(&ctx, &path.booking_id).await {
        Ok(true) => {
            state.publish_change(&ctx, Collection::Bookings, &path.booking_id, ChangeKind::Deleted);
            ok(())
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(path): Path<BookingPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let next = match parse_enum::<BookingStatus>(&req.status, "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let current = match state.booking_store.find_booking(&ctx, &path.booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    if current.status == next {
        return ok(booking_to_dto(current));
    }
    if let Err(err) = current.status.transition_to(next) {
        return bad_request_error(err.to_string());
    }
    let update = BookingUpdate {
        status: Some(next),
        updated_at_ms: now_ms(),
        ..BookingUpdate::default()
    };
    match state
        .booking_store
        .update_booking(&ctx, &path.booking_id, update)
        .await
    {
        Ok(Some(booking)) => {
            hms_telemetry::record_booking_status_change();
            state.publish_change(&ctx, Collection::Bookings, &booking.booking_id, ChangeKind::Updated);
            info!(
                booking_id = %booking.booking_id,
                from = current.status.as_str(),
                to = booking.status.as_str(),
                "booking status changed"
            );
            ok(booking_to_dto(booking))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn archive_booking(
    State(state): State<AppState>,
    Path(path): Path<BookingPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let current = match state.booking_store.find_booking(&ctx, &path.booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    if !current.status.is_closed() {
        return bad_request_error(format!(
            "only completed or cancelled bookings can be archived (status: {})",
            current.status
        ));
    }
    match state
        .booking_store
        .archive_booking(&ctx, &path.booking_id, now_ms())
        .await
    {
        Ok(Some(booking)) => {
            state.publish_change(&ctx, Collection::Bookings, &booking.booking_id, ChangeKind::Deleted);
            state.publish_change(
                &ctx,
                Collection::BookingArchive,
                &booking.booking_id,
                ChangeKind::Created,
            );
            ok(booking_to_dto(booking))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 导入外部预订文档；无法解析的文档计入 `skipped`，不中断整批导入。
pub async fn import_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ImportBookingsRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::BOOKING_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let mut imported = 0usize;
    let mut skipped = Vec::new();
    for (index, document) in req.documents.into_iter().enumerate() {
        let label = document
            .id
            .clone()
            .unwrap_or_else(|| format!("#{index}"));
        let Some(record) = imported_record(&ctx, document) else {
            warn!(document = %label, "import skipped unparsable booking");
            skipped.push(label);
            continue;
        };
        match state.booking_store.create_booking(&ctx, record).await {
            Ok(_) => imported += 1,
            Err(err) if err.kind() == StorageErrorKind::Conflict => {
                warn!(document = %label, "import skipped duplicate booking");
                skipped.push(label);
            }
            Err(err) => return storage_error(err),
        }
    }
    if imported > 0 {
        hms_telemetry::record_bookings_created(imported as u64);
        state.publish_change(&ctx, Collection::Bookings, "import", ChangeKind::Created);
    }
    info!(imported, skipped = skipped.len(), "bookings imported");
    ok(ImportBookingsResponse { imported, skipped })
}

fn imported_record(
    ctx: &HotelContext,
    document: api_contract::ImportBookingDocument,
) -> Option<BookingRecord> {
    document.check_in_date.to_datetime()?;
    let status = document.status.trim().parse::<BookingStatus>().ok()?;
    let guest_name = document.guest_name.trim().to_string();
    if guest_name.is_empty() || !document.total_amount.is_finite() {
        return None;
    }
    let now = now_ms();
    let check_in_date = document.check_in_date.into_text();
    let check_out_date = document
        .check_out_date
        .map(|value| value.into_text())
        .unwrap_or_else(|| check_in_date.clone());
    Some(BookingRecord {
        booking_id: blank_to_none(document.id).unwrap_or_else(|| generate_booking_reference(now)),
        hotel_id: ctx.hotel_id.clone(),
        guest_user_id: blank_to_none(document.guest_user_id).unwrap_or_default(),
        guest_name,
        guest_email: blank_to_none(document.guest_email),
        room_number: document.room_number.trim().to_string(),
        check_in_date,
        check_out_date,
        status,
        total_amount: document.total_amount,
        archived: false,
        created_at_ms: now,
        updated_at_ms: now,
    })
}

/// 当前登录用户名下的预订（活跃 + 归档），按入住日期倒序。
pub async fn my_bookings(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match require_hotel_context(&state, &headers) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let filter = BookingFilter {
        status: None,
        guest_user_id: Some(ctx.user_id.clone()),
    };
    let mut bookings = match state.booking_store.list_bookings(&ctx, &filter).await {
        Ok(bookings) => bookings,
        Err(err) => return storage_error(err),
    };
    match state.booking_store.list_archived_bookings(&ctx).await {
        Ok(archived) => bookings.extend(
            archived
                .into_iter()
                .filter(|booking| booking.guest_user_id == ctx.user_id),
        ),
        Err(err) => return storage_error(err),
    }
    bookings.sort_by_key(|booking| std::cmp::Reverse(parse_date_text(&booking.check_in_date)));
    let data: Vec<BookingDto> = bookings.into_iter().map(booking_to_dto).collect();
    ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{
        admin_headers, guest_headers, headers_with, read_json, seeded_state,
    };
    use api_contract::ImportBookingDocument;
    use axum::http::StatusCode;
    use domain::DocumentTimestamp;

    fn create_request(status: Option<&str>) -> CreateBookingRequest {
        CreateBookingRequest {
            guest_user_id: None,
            guest_name: "  Alice Doe ".to_string(),
            guest_email: Some("alice@example.com".to_string()),
            room_number: "202".to_string(),
            check_in_date: "2024-05-01".to_string(),
            check_out_date: "2024-05-03".to_string(),
            total_amount: 300.0,
            status: status.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn list_requires_read_permission() {
        let state = seeded_state();
        let headers = headers_with(&[permissions::ROOM_READ]);
        let response = list_bookings(State(state), headers, Query(StatusQuery::default())).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn list_rejects_unknown_status() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let query = StatusQuery {
            status: Some("lost".to_string()),
        };
        let response = list_bookings(State(state), headers, Query(query)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_assigns_reference_and_defaults() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let mut changes = state.changes.subscribe();
        let response = create_booking(State(state.clone()), headers, Json(create_request(None))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let event = changes.try_recv().expect("change event");
        assert_eq!(event.collection, Collection::Bookings);
        assert!(domain::is_valid_booking_reference(&event.document_id));

        let ctx = HotelContext::new("hotel-1", "user-1", vec![], vec![]);
        let created = state
            .booking_store
            .find_booking(&ctx, &event.document_id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(created.guest_name, "Alice Doe");
        assert_eq!(created.status, BookingStatus::Pending);
        assert_eq!(created.guest_user_id, "user-1");
    }

    #[tokio::test]
    async fn create_rejects_reversed_dates() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let mut request = create_request(None);
        request.check_out_date = "2024-04-28".to_string();
        let response = create_booking(State(state), headers, Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_follows_transitions() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let booking_id = "BK1761629700005u7v8w9x0y".to_string();

        let response = update_booking_status(
            State(state.clone()),
            Path(BookingPath {
                booking_id: booking_id.clone(),
            }),
            headers.clone(),
            Json(UpdateStatusRequest {
                status: "completed".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = update_booking_status(
            State(state),
            Path(BookingPath { booking_id }),
            headers,
            Json(UpdateStatusRequest {
                status: "confirmed".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn archive_only_closed_bookings() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;

        let response = archive_booking(
            State(state.clone()),
            Path(BookingPath {
                booking_id: "BK1761629700001a1b2c3d4e".to_string(),
            }),
            headers.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = archive_booking(
            State(state.clone()),
            Path(BookingPath {
                booking_id: "BK1761629700003k9l0m1n2o".to_string(),
            }),
            headers.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_booking(
            State(state),
            Path(BookingPath {
                booking_id: "BK1761629700003k9l0m1n2o".to_string(),
            }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn import_skips_bad_documents() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let document = |id: &str, check_in: DocumentTimestamp, status: &str| ImportBookingDocument {
            id: Some(id.to_string()),
            guest_user_id: Some("user-guest".to_string()),
            guest_name: "Imported Guest".to_string(),
            guest_email: None,
            room_number: "103".to_string(),
            check_in_date: check_in,
            check_out_date: None,
            status: status.to_string(),
            total_amount: 180.0,
        };
        let request = ImportBookingsRequest {
            documents: vec![
                document(
                    "BK1700000000001importaa",
                    DocumentTimestamp::Wrapper {
                        seconds: 1_700_000_000,
                        nanoseconds: 0,
                    },
                    "completed",
                ),
                document(
                    "BK1700000000002importbb",
                    DocumentTimestamp::Text("someday".to_string()),
                    "completed",
                ),
                document(
                    "BK1700000000003importcc",
                    DocumentTimestamp::Millis(1_700_000_000_000),
                    "teleported",
                ),
                document(
                    "BK1761629700001a1b2c3d4e",
                    DocumentTimestamp::Millis(1_700_000_000_000),
                    "pending",
                ),
                document(
                    "BK1761629662783i7bw7dtsz",
                    DocumentTimestamp::Millis(1_700_000_000_000),
                    "completed",
                ),
            ],
        };
        let response = import_bookings(State(state.clone()), headers, Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["imported"], 1);
        assert_eq!(body["data"]["skipped"].as_array().expect("skipped").len(), 4);

        let ctx = HotelContext::new("hotel-1", "user-1", vec![], vec![]);
        let imported = state
            .booking_store
            .find_booking(&ctx, "BK1700000000001importaa")
            .await
            .expect("find");
        assert!(imported.is_some());
        let skipped = state
            .booking_store
            .find_booking(&ctx, "BK1700000000002importbb")
            .await
            .expect("find");
        assert!(skipped.is_none());
    }

    #[tokio::test]
    async fn my_bookings_includes_archive() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response = my_bookings(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let data = body["data"].as_array().expect("array");
        let ids: Vec<&str> = data
            .iter()
            .map(|booking| booking["bookingId"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, vec!["BK1761629700001a1b2c3d4e", "BK1761629662783i7bw7dtsz"]);
        assert_eq!(data[1]["archived"], true);
    }
}
