//! Postgres 房间存储实现

use crate::error::StorageError;
use crate::models::{RoomRecord, RoomUpdate};
use crate::postgres::enum_column;
use crate::traits::RoomStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgRoomStore {
    pub pool: PgPool,
}

impl PgRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_room(row: &PgRow) -> Result<RoomRecord, StorageError> {
    Ok(RoomRecord {
        room_id: row.try_get("room_id")?,
        hotel_id: row.try_get("hotel_id")?,
        room_number: row.try_get("room_number")?,
        room_type: row.try_get("room_type")?,
        floor: row.try_get("floor")?,
        price_per_night: row.try_get("price_per_night")?,
        status: enum_column(row, "status")?,
    })
}

#[async_trait::async_trait]
impl RoomStore for PgRoomStore {
    async fn list_rooms(&self, ctx: &HotelContext) -> Result<Vec<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let rows = sqlx::query(
            "select room_id, hotel_id, room_number, room_type, floor, price_per_night, status \
             from rooms where hotel_id = $1 order by room_number",
        )
        .bind(&ctx.hotel_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_room).collect()
    }

    async fn find_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
    ) -> Result<Option<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let row = sqlx::query(
            "select room_id, hotel_id, room_number, room_type, floor, price_per_night, status \
             from rooms where hotel_id = $1 and room_id = $2",
        )
        .bind(&ctx.hotel_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_room).transpose()
    }

    async fn create_room(
        &self,
        ctx: &HotelContext,
        record: RoomRecord,
    ) -> Result<RoomRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        sqlx::query(
            "insert into rooms (room_id, hotel_id, room_number, room_type, floor, price_per_night, status) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.room_id)
        .bind(&record.hotel_id)
        .bind(&record.room_number)
        .bind(&record.room_type)
        .bind(record.floor)
        .bind(record.price_per_night)
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_room(
        &self,
        ctx: &HotelContext,
        room_id: &str,
        update: RoomUpdate,
    ) -> Result<Option<RoomRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let row = sqlx::query(
            "update rooms set \
             room_type = coalesce($1, room_type), \
             floor = coalesce($2, floor), \
             price_per_night = coalesce($3, price_per_night), \
             status = coalesce($4, status) \
             where hotel_id = $5 and room_id = $6 \
             returning room_id, hotel_id, room_number, room_type, floor, price_per_night, status",
        )
        .bind(update.room_type)
        .bind(update.floor)
        .bind(update.price_per_night)
        .bind(update.status.map(|status| status.as_str()))
        .bind(&ctx.hotel_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_room).transpose()
    }

    async fn delete_room(&self, ctx: &HotelContext, room_id: &str) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let result = sqlx::query("delete from rooms where hotel_id = $1 and room_id = $2")
            .bind(&ctx.hotel_id)
            .bind(room_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
