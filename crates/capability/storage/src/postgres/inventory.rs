//! Postgres 库存存储实现
//!
//! 库存调整使用单条 update 带非负条件，未命中时再区分"不存在"与"库存不足"。

use crate::error::StorageError;
use crate::models::{InventoryActivityRecord, InventoryItemRecord, InventoryItemUpdate};
use crate::postgres::enum_column;
use crate::traits::InventoryStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const ITEM_COLUMNS: &str = "item_id, hotel_id, name, category, current_stock, reorder_level, \
     unit_price, supplier, unit, location, image";

pub struct PgInventoryStore {
    pub pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: &PgRow) -> Result<InventoryItemRecord, StorageError> {
    Ok(InventoryItemRecord {
        item_id: row.try_get("item_id")?,
        hotel_id: row.try_get("hotel_id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        current_stock: row.try_get("current_stock")?,
        reorder_level: row.try_get("reorder_level")?,
        unit_price: row.try_get("unit_price")?,
        supplier: row.try_get("supplier")?,
        unit: row.try_get("unit")?,
        location: row.try_get("location")?,
        image: row.try_get("image")?,
    })
}

fn row_to_activity(row: &PgRow) -> Result<InventoryActivityRecord, StorageError> {
    Ok(InventoryActivityRecord {
        activity_id: row.try_get("activity_id")?,
        hotel_id: row.try_get("hotel_id")?,
        item_id: row.try_get("item_id")?,
        item_name: row.try_get("item_name")?,
        kind: enum_column(row, "kind")?,
        quantity_delta: row.try_get("quantity_delta")?,
        stock_after: row.try_get("stock_after")?,
        actor_id: row.try_get("actor_id")?,
        at_ms: row.try_get("at_ms")?,
    })
}

#[async_trait::async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list_items(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!("select {ITEM_COLUMNS} from inventory_items where hotel_id = $1 order by name");
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_item).collect()
    }

    async fn find_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql =
            format!("select {ITEM_COLUMNS} from inventory_items where hotel_id = $1 and item_id = $2");
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn create_item(
        &self,
        ctx: &HotelContext,
        record: InventoryItemRecord,
    ) -> Result<InventoryItemRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let sql = format!(
            "insert into inventory_items ({ITEM_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        );
        sqlx::query(&sql)
            .bind(&record.item_id)
            .bind(&record.hotel_id)
            .bind(&record.name)
            .bind(&record.category)
            .bind(record.current_stock)
            .bind(record.reorder_level)
            .bind(record.unit_price)
            .bind(&record.supplier)
            .bind(&record.unit)
            .bind(&record.location)
            .bind(&record.image)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        update: InventoryItemUpdate,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "update inventory_items set \
             name = coalesce($1, name), \
             category = coalesce($2, category), \
             reorder_level = coalesce($3, reorder_level), \
             unit_price = coalesce($4, unit_price), \
             supplier = coalesce($5, supplier), \
             unit = coalesce($6, unit), \
             location = coalesce($7, location), \
             image = coalesce($8, image) \
             where hotel_id = $9 and item_id = $10 \
             returning {ITEM_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(update.name)
            .bind(update.category)
            .bind(update.reorder_level)
            .bind(update.unit_price)
            .bind(update.supplier)
            .bind(update.unit)
            .bind(update.location)
            .bind(update.image)
            .bind(&ctx.hotel_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn delete_item(&self, ctx: &HotelContext, item_id: &str) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let result = sqlx::query("delete from inventory_items where hotel_id = $1 and item_id = $2")
            .bind(&ctx.hotel_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn adjust_stock(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        delta: i64,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!(
            "update inventory_items set current_stock = current_stock + $1 \
             where hotel_id = $2 and item_id = $3 and current_stock + $1 >= 0 \
             returning {ITEM_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(delta)
            .bind(&ctx.hotel_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        if let Some(row) = row {
            return Ok(Some(row_to_item(&row)?));
        }
        match self.find_item(ctx, item_id).await? {
            Some(_) => Err(StorageError::invalid("insufficient stock")),
            None => Ok(None),
        }
    }

    async fn record_activity(
        &self,
        ctx: &HotelContext,
        record: InventoryActivityRecord,
    ) -> Result<InventoryActivityRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        sqlx::query(
            "insert into inventory_activities \
             (activity_id, hotel_id, item_id, item_name, kind, quantity_delta, stock_after, actor_id, at_ms) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&record.activity_id)
        .bind(&record.hotel_id)
        .bind(&record.item_id)
        .bind(&record.item_name)
        .bind(record.kind.as_str())
        .bind(record.quantity_delta)
        .bind(record.stock_after)
        .bind(&record.actor_id)
        .bind(record.at_ms)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_activities(
        &self,
        ctx: &HotelContext,
        limit: usize,
    ) -> Result<Vec<InventoryActivityRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let rows = sqlx::query(
            "select activity_id, hotel_id, item_id, item_name, kind, quantity_delta, stock_after, actor_id, at_ms \
             from inventory_activities where hotel_id = $1 \
             order by at_ms desc limit $2",
        )
        .bind(&ctx.hotel_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_activity).collect()
    }
}
