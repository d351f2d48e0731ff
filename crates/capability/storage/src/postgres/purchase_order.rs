//! Postgres 采购单存储实现

use crate::error::StorageError;
use crate::models::PurchaseOrderRecord;
use crate::postgres::enum_column;
use crate::traits::PurchaseOrderStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{HotelContext, PurchaseOrderStatus};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgPurchaseOrderStore {
    pub pool: PgPool,
}

impl PgPurchaseOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_order(row: &PgRow) -> Result<PurchaseOrderRecord, StorageError> {
    Ok(PurchaseOrderRecord {
        order_id: row.try_get("order_id")?,
        hotel_id: row.try_get("hotel_id")?,
        supplier: row.try_get("supplier")?,
        description: row.try_get("description")?,
        total_amount: row.try_get("total_amount")?,
        status: enum_column(row, "status")?,
        ordered_at_ms: row.try_get("ordered_at_ms")?,
    })
}

#[async_trait::async_trait]
impl PurchaseOrderStore for PgPurchaseOrderStore {
    async fn list_orders(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<PurchaseOrderRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let rows = sqlx::query(
            "select order_id, hotel_id, supplier, description, total_amount, status, ordered_at_ms \
             from purchase_orders where hotel_id = $1 order by ordered_at_ms desc",
        )
        .bind(&ctx.hotel_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_order).collect()
    }

    async fn create_order(
        &self,
        ctx: &HotelContext,
        record: PurchaseOrderRecord,
    ) -> Result<PurchaseOrderRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        sqlx::query(
            "insert into purchase_orders \
             (order_id, hotel_id, supplier, description, total_amount, status, ordered_at_ms) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.order_id)
        .bind(&record.hotel_id)
        .bind(&record.supplier)
        .bind(&record.description)
        .bind(record.total_amount)
        .bind(record.status.as_str())
        .bind(record.ordered_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_order_status(
        &self,
        ctx: &HotelContext,
        order_id: &str,
        status: PurchaseOrderStatus,
    ) -> Result<Option<PurchaseOrderRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let row = sqlx::query(
            "update purchase_orders set status = $1 where hotel_id = $2 and order_id = $3 \
             returning order_id, hotel_id, supplier, description, total_amount, status, ordered_at_ms",
        )
        .bind(status.as_str())
        .bind(&ctx.hotel_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_order).transpose()
    }
}
