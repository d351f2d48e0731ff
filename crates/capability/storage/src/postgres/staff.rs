//! Postgres 员工存储实现
//!
//! 紧急联系人保存为 JSON 文本列。

use crate::error::StorageError;
use crate::models::{EmergencyContact, StaffRecord, StaffUpdate};
use crate::postgres::enum_column;
use crate::traits::StaffStore;
use crate::validation::{ensure_hotel, ensure_same_hotel};
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const STAFF_COLUMNS: &str = "staff_id, hotel_id, name, email, phone, role, department, position, \
     status, permissions, salary, emergency_contact, hired_at";

pub struct PgStaffStore {
    pub pool: PgPool,
}

impl PgStaffStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn encode_contact(contact: Option<&EmergencyContact>) -> Result<Option<String>, StorageError> {
    contact
        .map(|contact| serde_json::to_string(contact).map_err(StorageError::from))
        .transpose()
}

fn row_to_staff(row: &PgRow) -> Result<StaffRecord, StorageError> {
    let contact: Option<String> = row.try_get("emergency_contact")?;
    let emergency_contact = contact
        .map(|text| serde_json::from_str::<EmergencyContact>(&text))
        .transpose()?;
    Ok(StaffRecord {
        staff_id: row.try_get("staff_id")?,
        hotel_id: row.try_get("hotel_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        role: enum_column(row, "role")?,
        department: row.try_get("department")?,
        position: row.try_get("position")?,
        status: enum_column(row, "status")?,
        permissions: row.try_get("permissions")?,
        salary: row.try_get("salary")?,
        emergency_contact,
        hired_at: row.try_get("hired_at")?,
    })
}

#[async_trait::async_trait]
impl StaffStore for PgStaffStore {
    async fn list_staff(&self, ctx: &HotelContext) -> Result<Vec<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!("select {STAFF_COLUMNS} from staff where hotel_id = $1 order by name");
        let rows = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_staff).collect()
    }

    async fn find_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<Option<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let sql = format!("select {STAFF_COLUMNS} from staff where hotel_id = $1 and staff_id = $2");
        let row = sqlx::query(&sql)
            .bind(&ctx.hotel_id)
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_staff).transpose()
    }

    async fn create_staff(
        &self,
        ctx: &HotelContext,
        record: StaffRecord,
    ) -> Result<StaffRecord, StorageError> {
        ensure_same_hotel(ctx, &record.hotel_id)?;
        let contact = encode_contact(record.emergency_contact.as_ref())?;
        let sql = format!(
            "insert into staff ({STAFF_COLUMNS}) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        );
        sqlx::query(&sql)
            .bind(&record.staff_id)
            .bind(&record.hotel_id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(record.role.as_str())
            .bind(&record.department)
            .bind(&record.position)
            .bind(record.status.as_str())
            .bind(&record.permissions)
            .bind(record.salary)
            .bind(contact)
            .bind(&record.hired_at)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Option<StaffRecord>, StorageError> {
        ensure_hotel(ctx)?;
        let contact = encode_contact(update.emergency_contact.as_ref())?;
        let sql = format!(
            "update staff set \
             name = coalesce($1, name), \
             email = coalesce($2, email), \
             phone = coalesce($3, phone), \
             role = coalesce($4, role), \
             department = coalesce($5, department), \
             position = coalesce($6, position), \
             status = coalesce($7, status), \
             permissions = coalesce($8, permissions), \
             salary = coalesce($9, salary), \
             emergency_contact = coalesce($10, emergency_contact) \
             where hotel_id = $11 and staff_id = $12 \
             returning {STAFF_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(update.name)
            .bind(update.email)
            .bind(update.phone)
            .bind(update.role.map(|role| role.as_str()))
            .bind(update.department)
            .bind(update.position)
            .bind(update.status.map(|status| status.as_str()))
            .bind(update.permissions)
            .bind(update.salary)
            .bind(contact)
            .bind(&ctx.hotel_id)
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_staff).transpose()
    }

    async fn delete_staff(
        &self,
        ctx: &HotelContext,
        staff_id: &str,
    ) -> Result<bool, StorageError> {
        ensure_hotel(ctx)?;
        let result = sqlx::query("delete from staff where hotel_id = $1 and staff_id = $2")
            .bind(&ctx.hotel_id)
            .bind(staff_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
