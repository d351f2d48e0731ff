//! # PostgreSQL 存储实现模块
//!
//! 表结构见 `migrations/0001_init.sql`。
//!
//! ## 约定
//!
//! - 所有查询都带 `hotel_id` 条件，参数化绑定
//! - 枚举列保存 `as_str()` 文本，读取时经 `FromStr` 还原
//! - 嵌套结构（报表 summary/chart/table、紧急联系人、看板统计）保存为 JSON 文本
//! - 角色与权限使用 `text[]`
//! - 预订归档在一个事务内完成 delete + insert

pub mod booking;
pub mod contact;
pub mod inventory;
pub mod payment;
pub mod purchase_order;
pub mod report;
pub mod room;
pub mod staff;
pub mod stats;
pub mod user;

pub use booking::*;
pub use contact::*;
pub use inventory::*;
pub use payment::*;
pub use purchase_order::*;
pub use report::*;
pub use room::*;
pub use staff::*;
pub use stats::*;
pub use user::*;

use crate::error::StorageError;
use domain::DomainError;
use sqlx::Row;
use sqlx::postgres::PgRow;
use std::str::FromStr;

/// 读取枚举文本列。
pub(crate) fn enum_column<T>(row: &PgRow, column: &str) -> Result<T, StorageError>
where
    T: FromStr<Err = DomainError>,
{
    let text: String = row.try_get(column)?;
    Ok(text.parse::<T>()?)
}

/// 读取 JSON 文本列。
pub(crate) fn json_column<T>(row: &PgRow, column: &str) -> Result<T, StorageError>
where
    T: serde::de::DeserializeOwned,
{
    let text: String = row.try_get(column)?;
    Ok(serde_json::from_str(&text)?)
}
