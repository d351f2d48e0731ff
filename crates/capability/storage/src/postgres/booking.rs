//! Postgres 预订存储实现
//!
//! `bookings` 与 `booking_archive` 两张表结构相同，归档在事务内移动记录。

use crate::error::StorageError;
use crate::models::{BookingFilter, BookingRecord, BookingUpdate};
use crate::postgres::enum_column;
use crate::traits::BookingStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const BOOKING_COLUMNS: &str = "booking_id, hotel_id, guest_user_id, guest_name, guest_email, \
     room_number, check_in_date, check_out_date, status, total_amount, created_at_ms, updated_at_ms";

pub struct PgBookingStore {
    pub pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_booking(row: &PgRow, archived: bool) -> Result<BookingRecord, StorageError> {
    Ok(BookingRecord {
        booking_id: row.try_get("booking_id")?,
        hotel_id: row.try_get("hotel_id")?,
        guest_user_id: row.try_get("guest_user_id")?,
        guest_name: row.try_get("guest_name")?,
        guest_email: row.try_get("guest_email")?,
        room_number: row.try_get("room_number")?,
        check_in_date: row.try_get("check_in_date")?,
        check_out_date: row.try_get("check_out_date")?,
        status: enum_column(row, "status")?,
        total_amount: row.try_get("total_amount")?,
        archived,
        created_at_ms: row.try_get("created_at_ms")?,
        updated_at_ms: row.try_get("updated_at_ms")?,
    })
}

#[async_trait::async_trait]
impl BookingStore for PgBookingStore {
    async fn list_bookings(
        &self,
        ctx: &HotelContext,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {BOOKING_COLUMNS} from bookings \
             where hotel_id = $1 \
             and ($2::text is null or status = $2) \
             and ($3::text is null or guest_user_id = $3) \
             order by created_at_ms desc, booking_id"
        );
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(filter.status.map(|status| status.as_str()))
            .bind(filter.guest_user_id.as_deref())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| row_to_booking(row, false)).collect()
    }

    async fn find_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql =
            format!("select {BOOKING_COLUMNS} from bookings where hotel_id = $1 and booking_id = $2");
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|row| row_to_booking(row, false)).transpose()
    }

    async fn create_booking(
        &self,
        ctx: &HotelContext,
        record: BookingRecord,
    ) -> Result<BookingRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        // 已归档的预订号不可复用
        let sql = format!(
            "insert into bookings ({BOOKING_COLUMNS}) \
             select $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12 \
             where not exists (select 1 from booking_archive where booking_id = $1)"
        );
        let result = sqlx::query(&sql)
            .bind(&record.booking_id)
            .bind(&record.hotel_id)
            .bind(&record.guest_user_id)
            .bind(&record.guest_name)
            .bind(&record.guest_email)
            .bind(&record.room_number)
            .bind(&record.check_in_date)
            .bind(&record.check_out_date)
            .bind(record.status.as_str())
            .bind(record.total_amount)
            .bind(record.created_at_ms)
            .bind(record.updated_at_ms)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::conflict("booking exists"));
        }
        Ok(record)
    }

    async fn update_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        update: BookingUpdate,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "update bookings set \
             guest_name = coalesce($1, guest_name), \
             guest_email = coalesce($2, guest_email), \
             room_number = coalesce($3, room_number), \
             check_in_date = coalesce($4, check_in_date), \
             check_out_date = coalesce($5, check_out_date), \
             total_amount = coalesce($6, total_amount), \
             status = coalesce($7, status), \
             updated_at_ms = $8 \
             where hotel_id = $9 and booking_id = $10 \
             returning {BOOKING_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(update.guest_name)
            .bind(update.guest_email)
            .bind(update.room_number)
            .bind(update.check_in_date)
            .bind(update.check_out_date)
            .bind(update.total_amount)
            .bind(update.status.map(|status| status.as_str()))
            .bind(update.updated_at_ms)
            .bind(&ctx.hotel_id)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|row| row_to_booking(row, false)).transpose()
    }

    async fn delete_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let result = sqlx::query("delete from bookings where hotel_id = $1 and booking_id = $2")
            .bind(&ctx.hotel_id)
            .bind(booking_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn archive_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
        archived_at_ms: i64,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "delete from bookings where hotel_id = $1 and booking_id = $2 \
             returning {BOOKING_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let mut record = row_to_booking(&row, true)?;
        record.updated_at_ms = archived_at_ms;
        let sql = format!(
            "insert into booking_archive ({BOOKING_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
        );
        sqlx::query(&sql)
            .bind(&record.booking_id)
            .bind(&record.hotel_id)
            .bind(&record.guest_user_id)
            .bind(&record.guest_name)
            .bind(&record.guest_email)
            .bind(&record.room_number)
            .bind(&record.check_in_date)
            .bind(&record.check_out_date)
            .bind(record.status.as_str())
            .bind(record.total_amount)
            .bind(record.created_at_ms)
            .bind(record.updated_at_ms)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(record))
    }

    async fn find_archived_booking(
        &self,
        ctx: &HotelContext,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {BOOKING_COLUMNS} from booking_archive where hotel_id = $1 and booking_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|row| row_to_booking(row, true)).transpose()
    }

    async fn list_archived_bookings(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<BookingRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {BOOKING_COLUMNS} from booking_archive where hotel_id = $1 \
             order by created_at_ms desc, booking_id"
        );
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| row_to_booking(row, true)).collect()
    }
}
