//! Postgres 用户存储实现
//!
//! 设计要点：
//! - hotel_id 为空时按用户名全局查找（登录）
//! - refresh jti 与用户同表保存

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::traits::UserStore;
use domain::HotelContext;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgUserStore {
    pub pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 通过数据库 URL 建立连接池
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn row_to_user(row: &PgRow) -> Result<UserRecord, StorageError> {
    Ok(UserRecord {
        hotel_id: row.try_get("hotel_id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        password: row.try_get("password_hash")?,
        roles: row.try_get("roles")?,
        permissions: row.try_get("permissions")?,
    })
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(
        &self,
        ctx: &HotelContext,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let row = if ctx.hotel_id.is_empty() {
            sqlx::query(
                "select user_id, hotel_id, username, password_hash, roles, permissions \
                 from users where username = $1",
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query(
                "select user_id, hotel_id, username, password_hash, roles, permissions \
                 from users where username = $1 and hotel_id = $2",
            )
            .bind(username)
            .bind(&ctx.hotel_id)
            .fetch_optional(&self.pool)
            .await?
        };
        row.as_ref().map(row_to_user).transpose()
    }

    async fn create_user(
        &self,
        ctx: &HotelContext,
        record: UserRecord,
    ) -> Result<UserRecord, StorageError> {
        if !ctx.hotel_id.is_empty() && record.hotel_id != ctx.hotel_id {
            return Err(StorageError::new("hotel mismatch"));
        }
        sqlx::query(
            "insert into users (user_id, hotel_id, username, password_hash, roles, permissions) \
             values ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&record.user_id)
        .bind(&record.hotel_id)
        .bind(&record.username)
        .bind(&record.password)
        .bind(&record.roles)
        .bind(&record.permissions)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_password_hash(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let result = if ctx.hotel_id.is_empty() {
            sqlx::query("update users set password_hash = $2 where user_id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?
        } else {
            sqlx::query("update users set password_hash = $3 where hotel_id = $1 and user_id = $2")
                .bind(&ctx.hotel_id)
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?
        };
        Ok(result.rows_affected() > 0)
    }

    async fn get_refresh_jti(
        &self,
        ctx: &HotelContext,
        user_id: &str,
    ) -> Result<Option<String>, StorageError> {
        let jti: Option<Option<String>> = if ctx.hotel_id.is_empty() {
            sqlx::query_scalar("select refresh_jti from users where user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("select refresh_jti from users where hotel_id = $1 and user_id = $2")
                .bind(&ctx.hotel_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
        };
        Ok(jti.flatten())
    }

    async fn set_refresh_jti(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let result = if ctx.hotel_id.is_empty() {
            sqlx::query("update users set refresh_jti = $2 where user_id = $1")
                .bind(user_id)
                .bind(refresh_jti)
                .execute(&self.pool)
                .await?
        } else {
            sqlx::query("update users set refresh_jti = $3 where hotel_id = $1 and user_id = $2")
                .bind(&ctx.hotel_id)
                .bind(user_id)
                .bind(refresh_jti)
                .execute(&self.pool)
                .await?
        };
        Ok(result.rows_affected() > 0)
    }
}
