//! 房间 handlers：`GET/POST /rooms`、`GET/PUT/DELETE /rooms/:room_id`

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::room_to_dto;
use crate::utils::response::{not_found_error, ok, storage_error};
use crate::utils::validation::{
    ensure_non_negative, normalize_optional, normalize_required, parse_optional_enum,
};
use api_contract::{CreateRoomRequest, RoomDto, UpdateRoomRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use domain::{RoomStatus, permissions};
use hms_storage::{ChangeKind, Collection, RoomRecord, RoomUpdate};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct RoomPath {
    room_id: String,
}

/// 未给出楼层时取房间号首位数字（`204` → 2），否则为 1。
fn floor_from_room_number(room_number: &str) -> i32 {
    room_number
        .chars()
        .next()
        .and_then(|first| first.to_digit(10))
        .map(|digit| digit as i32)
        .filter(|floor| *floor > 0)
        .unwrap_or(1)
}

pub async fn list_rooms(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::ROOM_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.room_store.list_rooms(&ctx).await {
        Ok(rooms) => {
            let data: Vec<RoomDto> = rooms.into_iter().map(room_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateRoomRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::ROOM_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let room_number = match normalize_required(req.room_number, "roomNumber") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let room_type = match normalize_required(req.room_type, "roomType") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let price_per_night = match ensure_non_negative(req.price_per_night, "pricePerNight") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<RoomStatus>(req.status.as_deref(), "status") {
        Ok(status) => status.unwrap_or(RoomStatus::Available),
        Err(response) => return response,
    };
    let record = RoomRecord {
        room_id: format!("room-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        floor: req
            .floor
            .unwrap_or_else(|| floor_from_room_number(&room_number)),
        room_number,
        room_type,
        price_per_night,
        status,
    };
    match state.room_store.create_room(&ctx, record).await {
        Ok(room) => {
            state.publish_change(&ctx, Collection::Rooms, &room.room_id, ChangeKind::Created);
            ok(room_to_dto(room))
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(path): Path<RoomPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::ROOM_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.room_store.find_room(&ctx, &path.room_id).await {
        Ok(Some(room)) => ok(room_to_dto(room)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(path): Path<RoomPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateRoomRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::ROOM_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let room_type = match normalize_optional(req.room_type, "roomType") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let price_per_night = match req.price_per_night {
        Some(price) => match ensure_non_negative(price, "pricePerNight") {
            Ok(value) => Some(value),
            Err(response) => return response,
        },
        None => None,
    };
    let status = match parse_optional_enum::<RoomStatus>(req.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let update = RoomUpdate {
        room_type,
        floor: req.floor,
        price_per_night,
        status,
    };
    match state.room_store.update_room(&ctx, &path.room_id, update).await {
        Ok(Some(room)) => {
            state.publish_change(&ctx, Collection::Rooms, &room.room_id, ChangeKind::Updated);
            ok(room_to_dto(room))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(path): Path<RoomPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::ROOM_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.room_store.delete_room(&ctx, &path.room_id).await {
        Ok(true) => {
            state.publish_change(&ctx, Collection::Rooms, &path.room_id, ChangeKind::Deleted);
            ok(())
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{admin_headers, headers_with, read_json, seeded_state};
    use axum::http::StatusCode;

    fn create_request(room_number: &str) -> CreateRoomRequest {
        CreateRoomRequest {
            room_number: room_number.to_string(),
            room_type: "deluxe".to_string(),
            floor: None,
            price_per_night: 199.0,
            status: None,
        }
    }

    #[test]
    fn floor_defaults_from_number() {
        assert_eq!(floor_from_room_number("204"), 2);
        assert_eq!(floor_from_room_number("PH1"), 1);
        assert_eq!(floor_from_room_number("012"), 1);
    }

    #[tokio::test]
    async fn duplicate_room_number_conflicts() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = create_room(State(state.clone()), headers.clone(), Json(create_request("401"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["floor"], 4);
        assert_eq!(body["data"]["status"], "available");

        let response = create_room(State(state), headers, Json(create_request("101"))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let request = UpdateRoomRequest {
            status: Some("haunted".to_string()),
            ..UpdateRoomRequest::default()
        };
        let response = update_room(
            State(state),
            Path(RoomPath {
                room_id: "room-101".to_string(),
            }),
            headers,
            Json(request),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn write_requires_permission() {
        let state = seeded_state();
        let headers = headers_with(&[permissions::ROOM_READ]);
        let response = delete_room(
            State(state),
            Path(RoomPath {
                room_id: "room-101".to_string(),
            }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_room_is_not_found() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = get_room(
            State(state),
            Path(RoomPath {
                room_id: "room-missing".to_string(),
            }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
