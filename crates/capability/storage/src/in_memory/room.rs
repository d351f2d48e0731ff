//! 房间内存存储实现

use crate::error::StorageError;
use crate::models::{RoomRecord, RoomUpdate};
use crate::traits::RoomStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryRoomStore {
    rooms: RwLock<HashMap<String, RoomRecord>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::with_rooms(Vec::new())
    }

    pub fn with_rooms(records: Vec<RoomRecord>) -> Self {
        Self {
            rooms: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.room_id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn list_rooms(&self, ctx: &HotelContext) -> Result<Vec<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<RoomRecord> = self
            .rooms
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(items)
    }

    async fn find_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
    ) -> Result<Option<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .rooms
            .read()
            .ok()
            .and_then(|map| map.get(room_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn create_room(
        &self,
        ctx: &HotelContext,
        record: RoomRecord,
    ) -> Result<RoomRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .rooms
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let duplicate = map.values().any(|item| {
            item.hotel_id == record.hotel_id && item.room_number == record.room_number
        });
        if duplicate || map.contains_key(&record.room_id) {
            return Err(StorageError::conflict("room number exists"));
        }
        map.insert(record.room_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
        update: RoomUpdate,
    ) -> Result<Option<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .rooms
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let room = match map.get_mut(room_id) {
            Some(room) if room.hotel_id == ctx.hotel_id => room,
            _ => return Ok(None),
        };
        if let Some(room_type) = update.room_type {
            room.room_type = room_type;
        }
        if let Some(floor) = update.floor {
            room.floor = floor;
        }
        if let Some(price) = update.price_per_night {
            room.price_per_night = price;
        }
        if let Some(status) = update.status {
            room.status = status;
        }
        Ok(Some(room.clone()))
    }

    async fn delete_room(&self, ctx: &HotelContext, room_id: &str) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .rooms
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get(room_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => {
                map.remove(room_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
