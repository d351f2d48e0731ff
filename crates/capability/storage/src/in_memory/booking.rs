//! 预订内存存储实现
//!
//! 活跃预订与归档预订分别保存在两个 map 中。

use crate::error::StorageError;
use crate::models::{BookingFilter, BookingRecord, BookingUpdate};
use crate::traits::BookingStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryBookingStore {
    bookings: RwLock<HashMap<String, BookingRecord>>,
    archive: RwLock<HashMap<String, BookingRecord>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(HashMap::new()),
            archive: RwLock::new(HashMap::new()),
        }
    }

    /// 以给定记录初始化；archived 为 true 的记录进入归档集合。
    pub fn with_bookings(records: Vec<BookingRecord>) -> Self {
        let (archived, active): (Vec<_>, Vec<_>) =
            records.into_iter().partition(|record| record.archived);
        Self {
            bookings: RwLock::new(
                active
                    .into_iter()
                    .map(|record| (record.booking_id.clone(), record))
                    .collect(),
            ),
            archive: RwLock::new(
                archived
                    .into_iter()
                    .map(|record| (record.booking_id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_newest_first(mut items: Vec<BookingRecord>) -> Vec<BookingRecord> {
    items.sort_by(|a, b| {
        b.created_at_ms
            .cmp(&a.created_at_ms)
            .then_with(|| a.booking_id.cmp(&b.booking_id))
    });
    items
}

#[async_trait::async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn list_bookings(
        &self,
        ctx: &HotelContext,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let items = self
            .bookings
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id && filter.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(sorted_newest_first(items))
    }

    async fn find_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .bookings
            .read()
            .ok()
            .and_then(|map| map.get(booking_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn create_booking(
        &self,
        ctx: &HotelContext,
        record: BookingRecord,
    ) -> Result<BookingRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        // 与归档相同的加锁顺序；预订号在两个集合中都必须唯一。
        let mut map = self
            .bookings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let archive = self
            .archive
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.booking_id) || archive.contains_key(&record.booking_id) {
            return Err(StorageError::conflict("booking exists"));
        }
        map.insert(record.booking_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        update: BookingUpdate,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .bookings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let booking = match map.get_mut(booking_id) {
            Some(booking) if booking.hotel_id == ctx.hotel_id => booking,
            _ => return Ok(None),
        };
        if let Some(guest_name) = update.guest_name {
            booking.guest_name = guest_name;
        }
        if let Some(guest_email) = update.guest_email {
            booking.guest_email = Some(guest_email);
        }
        if let Some(room_number) = update.room_number {
            booking.room_number = room_number;
        }
        if let Some(check_in_date) = update.check_in_date {
            booking.check_in_date = check_in_date;
        }
        if let Some(check_out_date) = update.check_out_date {
            booking.check_out_date = check_out_date;
        }
        if let Some(total_amount) = update.total_amount {
            booking.total_amount = total_amount;
        }
        if let Some(status) = update.status {
            booking.status = status;
        }
        booking.updated_at_ms = update.updated_at_ms;
        Ok(Some(booking.clone()))
    }

    async fn delete_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .bookings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get(booking_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => {
                map.remove(booking_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn archive_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        archived_at_ms: i64,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        // 固定加锁顺序：先活跃集合，再归档集合。
        let mut active = self
            .bookings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut archive = self
            .archive
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut record = match active.get(booking_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => item.clone(),
            _ => return Ok(None),
        };
        active.remove(booking_id);
        record.archived = true;
        record.updated_at_ms = archived_at_ms;
        archive.insert(record.booking_id.clone(), record.clone());
        Ok(Some(record))
    }

    async fn find_archived_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .archive
            .read()
            .ok()
            .and_then(|map| map.get(booking_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn list_archived_bookings(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let items = self
            .archive
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(sorted_newest_first(items))
    }
}
