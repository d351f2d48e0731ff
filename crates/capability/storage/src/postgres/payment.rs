//! Postgres 支付存储实现

use crate::error::StorageError;
use crate::models::{PaymentFilter, PaymentRecord};
use crate::postgres::enum_column;
use crate::traits::PaymentStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{HotelContext, PaymentStatus};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const PAYMENT_COLUMNS: &str = "payment_id, hotel_id, guest_name, room_number, amount, \
     payment_method, status, transaction_at_ms, reference, description";

pub struct PgPaymentStore {
    pub pool: PgPool,
}

impl PgPaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_payment(row: &PgRow) -> Result<PaymentRecord, StorageError> {
    Ok(PaymentRecord {
        payment_id: row.try_get("payment_id")?,
        hotel_id: row.try_get("hotel_id")?,
        guest_name: row.try_get("guest_name")?,
        room_number: row.try_get("room_number")?,
        amount: row.try_get("amount")?,
        payment_method: enum_column(row, "payment_method")?,
        status: enum_column(row, "status")?,
        transaction_at_ms: row.try_get("transaction_at_ms")?,
        reference: row.try_get("reference")?,
        description: row.try_get("description")?,
    })
}

#[async_trait::async_trait]
impl PaymentStore for PgPaymentStore {
    async fn list_payments(
        &self,
        ctx: &HotelContext,
        filter: &PaymentFilter,
    ) -> Result<Vec<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "select {PAYMENT_COLUMNS} from payments \
             where hotel_id = $1 \
             and ($2::text is null or status = $2) \
             and ($3::text is null or payment_method = $3) \
             order by transaction_at_ms desc"
        );
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(filter.status.map(|status| status.as_str()))
            .bind(filter.method.map(|method| method.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_payment).collect()
    }

    async fn find_payment(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
    ) -> Result<Option<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql =
            format!("select {PAYMENT_COLUMNS} from payments where hotel_id = $1 and payment_id = $2");
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_payment).transpose()
    }

    async fn create_payment(
        &self,
        ctx: &HotelContext,
        record: PaymentRecord,
    ) -> Result<PaymentRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let sql = format!(
            "insert into payments ({PAYMENT_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        );
        sqlx::query(&sql)
            .bind(&record.payment_id)
            .bind(&record.hotel_id)
            .bind(&record.guest_name)
            .bind(&record.room_number)
            .bind(record.amount)
            .bind(record.payment_method.as_str())
            .bind(record.status.as_str())
            .bind(record.transaction_at_ms)
            .bind(&record.reference)
            .bind(&record.description)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update_payment_status(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "update payments set status = $1 where hotel_id = $2 and payment_id = $3 \
             returning {PAYMENT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(&ctx.hotel_id)
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_payment).transpose()
    }
}
