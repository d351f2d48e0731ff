//! 员工内存存储实现

use crate::error::StorageError;
use crate::models::{StaffRecord, StaffUpdate};
use crate::traits::StaffStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryStaffStore {
    staff: RwLock<HashMap<String, StaffRecord>>,
}

impl InMemoryStaffStore {
    pub fn new() -> Self {
        Self::with_staff(Vec::new())
    }

    pub fn with_staff(records: Vec<StaffRecord>) -> Self {
        Self {
            staff: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.staff_id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryStaffStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StaffStore for InMemoryStaffStore {
    async fn list_staff(&self, ctx: &HotelContext) -> Result<Vec<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut items: Vec<StaffRecord> = self
            .staff
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

    async fn find_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<Option<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        Ok(self
            .staff
            .read()
            .ok()
            .and_then(|map| map.get(staff_id).cloned())
            .filter(|item| item.hotel_id == ctx.hotel_id))
    }

    async fn create_staff(
        &self,
        ctx: &HotelContext,
        record: StaffRecord,
    ) -> Result<StaffRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let mut map = self
            .staff
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let duplicate_email = map
            .values()
            .any(|item| item.hotel_id == record.hotel_id && item.email == record.email);
        if duplicate_email || map.contains_key(&record.staff_id) {
            return Err(StorageError::conflict("staff email exists"));
        }
        map.insert(record.staff_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Option<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .staff
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let member = match map.get_mut(staff_id) {
            Some(member) if member.hotel_id == ctx.hotel_id => member,
            _ => return Ok(None),
        };
        if let Some(name) = update.name {
            member.name = name;
        }
        if let Some(email) = update.email {
            member.email = email;
        }
        if let Some(phone) = update.phone {
            member.phone = Some(phone);
        }
        if let Some(role) = update.role {
            member.role = role;
        }
        if let Some(department) = update.department {
            member.department = department;
        }
        if let Some(position) = update.position {
            member.position = position;
        }
        if let Some(status) = update.status {
            member.status = status;
        }
        if let Some(permissions) = update.permissions {
            member.permissions = permissions;
        }
        if let Some(salary) = update.salary {
            member.salary = salary;
        }
        if let Some(contact) = update.emergency_contact {
            member.emergency_contact = Some(contact);
        }
        Ok(Some(member.clone()))
    }

    async fn delete_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let mut map = self
            .staff
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get(staff_id) {
            Some(item) if item.hotel_id == ctx.hotel_id => {
                map.remove(staff_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
