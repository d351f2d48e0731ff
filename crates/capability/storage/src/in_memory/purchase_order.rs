//! 采购单内存存储实现

use crate::error::StorageError;
use crate::models::PurchaseOrderRecord;
use crate::traits::PurchaseOrderStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{HotelContext, PurchaseOrderStatus};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryPurchaseOrderStore {
    orders: RwLock<HashMap<String, PurchaseOrderRecord>>,
}

impl InMemoryPurchaseOrderStore {
    pub fn new() -> Self {
        Self::with_orders(Vec::new())
    }

    pub fn with_orders(records: Vec<PurchaseOrderRecord>) -> Self {
        Self {
            orders: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.order_id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryPurchaseOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PurchaseOrderStore for InMemoryPurchaseOrderStore {
    async fn list_orders(
        &self,
        ctx: &HotelContext,
    ) -> Result<Vec<PurchaseOrderRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<PurchaseOrderRecord> = self
            .orders
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.ordered_at_ms.cmp(&a.ordered_at_ms));
        Ok(items)
    }

    async fn create_order(
        &self,
        ctx: &HotelContext,
        record: PurchaseOrderRecord,
    ) -> Result<PurchaseOrderRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .orders
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.order_id) {
            return Err(StorageError::conflict("purchase order exists"));
        }
        map.insert(record.order_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_order_status(
        &self,
        ctx: &HotelContext,
        order_id: &str,
        status: PurchaseOrderStatus,
    ) -> Result<Option<PurchaseOrderRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .orders
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get_mut(order_id) {
            Some(order) if order.hotel_id == ctx.hotel_id => {
                order.status = status;
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }
}
