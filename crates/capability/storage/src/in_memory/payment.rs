//! 支付内存存储实现

use crate::error::StorageError;
use crate::models::{PaymentFilter, PaymentRecord};
use crate::traits::PaymentStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{HotelContext, PaymentStatus};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryPaymentStore {
    payments: RwLock<HashMap<String, PaymentRecord>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::with_payments(Vec::new())
    }

    pub fn with_payments(records: Vec<PaymentRecord>) -> Self {
        Self {
            payments: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.payment_id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn list_payments(
        &self,
        ctx: &HotelContext,
        filter: &PaymentFilter,
    ) -> Result<Vec<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<PaymentRecord> = self
            .payments
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id && filter.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.transaction_at_ms.cmp(&a.transaction_at_ms));
        Ok(items)
    }

    async fn find_payment(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
    ) -> Result<Option<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .payments
            .read()
            .ok()
            .and_then(|map| map.get(payment_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn create_payment(
        &self,
        ctx: &HotelContext,
        record: PaymentRecord,
    ) -> Result<PaymentRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .payments
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.payment_id) {
            return Err(StorageError::conflict("payment exists"));
        }
        map.insert(record.payment_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_payment_status(
        &self,
        ctx: &HotelContext,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<PaymentRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .payments
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get_mut(payment_id) {
            Some(payment) if payment.hotel_id == ctx.hotel_id => {
                payment.status = status;
                Ok(Some(payment.clone()))
            }
            _ => Ok(None),
        }
    }
}
