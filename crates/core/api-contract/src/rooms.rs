use domain::RoomStatus;
use serde::{Deserialize, Serialize};

/// 房间创建请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type: String,
    pub floor: Option<i32>,
    pub price_per_night: f64,
    pub status: Option<String>,
}

/// 房间更新请求体。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_type: Option<String>,
    pub floor: Option<i32>,
    pub price_per_night: Option<f64>,
    pub status: Option<String>,
}

/// 房间返回结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_id: String,
    pub hotel_id: String,
    pub room_number: String,
    pub room_type: String,
    pub floor: i32,
    pub price_per_night: f64,
    pub status: RoomStatus,
}
