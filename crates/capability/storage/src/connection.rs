//! 数据库连接管理
//!
//! - connect_pool：建立 Postgres 连接池（最大连接数 8）
//! - apply_schema：执行内置建表脚本（幂等）

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const INIT_SCHEMA: &str = include_str!("../migrations/0001_init.sql");

/// 建立 Postgres 连接池
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// 执行建表脚本，所有语句均为 `if not exists`。
pub async fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::raw_sql(INIT_SCHEMA).execute(pool).await?;
    Ok(())
}
