//! 库存内存存储实现
//!
//! 功能：
//! - 库存物品 CRUD
//! - 按增量调整库存（不允许变为负数）
//! - 库存变动记录（只追加）

use crate::error::StorageError;
use crate::models::{InventoryActivityRecord, InventoryItemRecord, InventoryItemUpdate};
use crate::traits::InventoryStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryInventoryStore {
    items: RwLock<HashMap<String, InventoryItemRecord>>,
    activities: RwLock<Vec<InventoryActivityRecord>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(records: Vec<InventoryItemRecord>) -> Self {
        Self {
            items: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.item_id.clone(), record))
                    .collect(),
            ),
            activities: RwLock::new(Vec::new()),
        }
    }

    /// 已记录的变动数量（用于测试）
    pub fn activity_len(&self) -> usize {
        self.activities.read().map(|v| v.len()).unwrap_or(0)
    }
}

impl Default for InMemoryInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_items(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<InventoryItemRecord> = self
            .items
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .items
            .read()
            .ok()
            .and_then(|map| map.get(item_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn create_item(
        &self,
        ctx: &HotelContext,
        record: InventoryItemRecord,
    ) -> Result<InventoryItemRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .items
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.item_id) {
            return Err(StorageError::conflict("inventory item exists"));
        }
        map.insert(record.item_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_item(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        update: InventoryItemUpdate,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .items
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let item = match map.get_mut(item_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => item,
            _ => return Ok(None),
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(reorder_level) = update.reorder_level {
            item.reorder_level = reorder_level;
        }
        if let Some(unit_price) = update.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(supplier) = update.supplier {
            item.supplier = Some(supplier);
        }
        if let Some(unit) = update.unit {
            item.unit = Some(unit);
        }
        if let Some(location) = update.location {
            item.location = Some(location);
        }
        if let Some(image) = update.image {
            item.image = Some(image);
        }
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, ctx: &HotelContext, item_id: &str) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .items
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get(item_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => {
                map.remove(item_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn adjust_stock(
        &self,
        ctx: &HotelContext,
        item_id: &str,
        delta: i64,
    ) -> Result<Option<InventoryItemRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .items
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let item = match map.get_mut(item_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => item,
            _ => return Ok(None),
        };
        let next = item.current_stock.saturating_add(delta);
        if next < 0 {
            return Err(StorageError::invalid("insufficient stock"));
        }
        item.current_stock = next;
        Ok(Some(item.clone()))
    }

    async fn record_activity(
        &self,
        ctx: &HotelContext,
        record: InventoryActivityRecord,
    ) -> Result<InventoryActivityRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut activities = self
            .activities
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        activities.push(record.clone());
        Ok(record)
    }

    async fn list_activities(
        &self,
        ctx: &HotelContext,
        limit: usize,
    ) -> Result<Vec<InventoryActivityRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let activities = self
            .activities
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        // 追加顺序即时间顺序，倒序遍历；同毫秒内保持后写在前。
        let mut items: Vec<InventoryActivityRecord> = activities
            .iter()
            .rev()
            .filter(|item| item.hotel_id == ctx.hotel_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.at_ms.cmp(&a.at_ms));
        items.truncate(limit);
        Ok(items)
    }
}
