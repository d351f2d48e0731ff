//! 联系申请内存存储实现

use crate::error::StorageError;
use crate::models::ContactRequestRecord;
use crate::traits::ContactRequestStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::{ContactStatus, HotelContext};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryContactRequestStore {
    requests: RwLock<HashMap<String, ContactRequestRecord>>,
}

impl InMemoryContactRequestStore {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
        }
    }

    /// 当前申请数量（用于测试）
    pub fn len(&self) -> usize {
        self.requests.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryContactRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContactRequestStore for InMemoryContactRequestStore {
    async fn create_contact_request(
        &self,
        ctx: &HotelContext,
        record: ContactRequestRecord,
    ) -> Result<ContactRequestRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .requests
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.request_id) {
            return Err(StorageError::conflict("contact request exists"));
        }
        map.insert(record.request_id.clone(), record.clone());
        Ok(record)
    }

    async fn list_contact_requests(
        &self,
        ctx: &HotelContext,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<ContactRequestRecord> = self
            .requests
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| item.hotel_id == ctx.hotel_id)
                    .filter(|item| status.is_none_or(|status| item.status == status))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
        Ok(items)
    }

    async fn find_contact_request(
        &self,
        ctx: &HotelContext,
        request_id: &str,
    ) -> Result<Option<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .requests
            .read()
            .ok()
            .and_then(|map| map.get(request_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn update_contact_status(
        &self,
        ctx: &HotelContext,
        request_id: &str,
        status: ContactStatus,
        updated_at_ms: i64,
    ) -> Result<Option<ContactRequestRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .requests
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get_mut(request_id) {
            Some(request) if request.hotel_id == ctx.hotel_id => {
                request.status = status;
                request.updated_at_ms = updated_at_ms;
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }
}
