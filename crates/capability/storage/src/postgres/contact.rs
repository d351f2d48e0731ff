//! Postgres 联系申请存储实现

use crate::error::StorageError;
use crate::models::ContactRequestRecord;
use crate::postgres::enum_column;
use crate::traits::ContactRequestStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{ContactStatus, HotelContext};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const CONTACT_COLUMNS: &str = "request_id, hotel_id, reference_number, user_id, name, email, \
     phone, inquiry_type, booking_reference, subject, message, status, created_at_ms, updated_at_ms";

pub struct PgContactRequestStore {
    pub pool: PgPool,
}

impl PgContactRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_request(row: &PgRow) -> Result<ContactRequestRecord, StorageError> {
    Ok(ContactRequestRecord {
        request_id: row.try_get("request_id")?,
        hotel_id: row.try_get("hotel_id")?,
        reference_number: row.try_get("reference_number")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        inquiry_type: enum_column(row, "inquiry_type")?,
        booking_reference: row.try_get("booking_reference")?,
        subject: row.try_get("subject")?,
        message: row.try_get("message")?,
        status: enum_column(row, "status")?,
        created_at_ms: row.try_get("created_at_ms")?,
        updated_at_ms: row.try_get("updated_at_ms")?,
    })
}

#[async_trait::async_trait]
impl ContactRequestStore for PgContactRequestStore {
    async fn create_contact_request(
        &self,
        ctx: &HotelContext,
        record: ContactRequestRecord,
    ) -> Result<ContactRequestRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let sql = format!(
            "insert into contact_requests ({CONTACT_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
        );
        sqlx::query(&sql)
            .bind(&record.request_id)
            .bind(&record.hotel_id)
            .bind(&record.reference_number)
            .bind(&record.user_id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(record.inquiry_type.as_str())
            .bind(&record.booking_reference)
            .bind(&record.subject)
            .bind(&record.message)
            .bind(record.status.as_str())
            .bind(record.created_at_ms)
            .bind(record.updated_at_ms)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn list_contact_requests(
        &self,
        ctx: &HotelContext,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {CONTACT_COLUMNS} from contact_requests \
             where hotel_id = $1 and ($2::text is null or status = $2) \
             order by created_at_ms desc"
        );
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(status.map(|status| status.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_request).collect()
    }

    async fn find_contact_request(
        &self,
        ctx: &HotelContext,
        request_id: &str,
    ) -> Result<Option<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {CONTACT_COLUMNS} from contact_requests where hotel_id = $1 and request_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_request).transpose()
    }

    async fn update_contact_status(
        &self,
        ctx: &HotelContext,
        request_id: &str,
        status: ContactStatus,
        updated_at_ms: i64,
    ) -> Result<Option<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "update contact_requests set status = $1, updated_at_ms = $2 \
             where hotel_id = $3 and request_id = $4 \
             returning {CONTACT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(updated_at_ms)
            .bind(&ctx.hotel_id)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_request).transpose()
    }
}
