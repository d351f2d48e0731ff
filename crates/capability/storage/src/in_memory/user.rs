//! 用户内存存储实现
//!
//! 功能：
//! - 内置 admin 账户（用户名：admin，密码：admin123）
//! - 内置 guest 账户（用户名：guest，密码：guest123，仅可提交联系申请）
//! - 根据用户名查找用户、注册、refresh jti 绑定

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::traits::UserStore;
use domain::HotelContext;
use domain::permissions::{GUEST_PERMISSIONS, PERMISSION_CODES, ROLE_ADMIN, ROLE_GUEST};
use std::collections::HashMap;
use std::sync::RwLock;

pub const DEFAULT_HOTEL_ID: &str = "hotel-1";
pub const DEFAULT_ADMIN_ID: &str = "user-1";
pub const DEFAULT_GUEST_ID: &str = "user-guest";

/// 用户内存存储
///
/// 以用户名为键，refresh jti 单独保存。
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    refresh_jti: RwLock<HashMap<String, String>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            refresh_jti: RwLock::new(HashMap::new()),
        }
    }

    /// 内置 admin 与 guest 账户
    pub fn with_default_admin() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "admin".to_string(),
            UserRecord {
                hotel_id: DEFAULT_HOTEL_ID.to_string(),
                user_id: DEFAULT_ADMIN_ID.to_string(),
                username: "admin".to_string(),
                password: "admin123".to_string(),
                roles: vec![ROLE_ADMIN.to_string()],
                permissions: PERMISSION_CODES.iter().map(|code| (*code).to_string()).collect(),
            },
        );
        users.insert(
            "guest".to_string(),
            UserRecord {
                hotel_id: DEFAULT_HOTEL_ID.to_string(),
                user_id: DEFAULT_GUEST_ID.to_string(),
                username: "guest".to_string(),
                password: "guest123".to_string(),
                roles: vec![ROLE_GUEST.to_string()],
                permissions: GUEST_PERMISSIONS.iter().map(|code| (*code).to_string()).collect(),
            },
        );
        Self {
            users: RwLock::new(users),
            refresh_jti: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 空 hotel_id 表示不限定酒店（登录场景）。
fn visible(ctx: &HotelContext, user: &UserRecord) -> bool {
    ctx.hotel_id.is_empty() || ctx.hotel_id == user.hotel_id
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(
        &self,
        ctx: &HotelContext,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        Ok(self
            .users
            .read()
            .ok()
            .and_then(|map| map.get(username).cloned())
            .filter(|user| visible(ctx, user)))
    }

    async fn create_user(
        &self,
        ctx: &HotelContext,
        record: UserRecord,
    ) -> Result<UserRecord, StorageError> {
        if !ctx.hotel_id.is_empty() && record.hotel_id != ctx.hotel_id {
            return Err(StorageError::new("hotel mismatch"));
        }
        let mut map = self
            .users
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.username) {
            return Err(StorageError::conflict("username exists"));
        }
        map.insert(record.username.clone(), record.clone());
        Ok(record)
    }

    async fn update_password_hash(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut map = self
            .users
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(user) = map
            .values_mut()
            .find(|user| user.user_id == user_id && visible(ctx, user))
        else {
            return Ok(false);
        };
        user.password = password_hash.to_string();
        Ok(true)
    }

    async fn get_refresh_jti(
        &self,
        _ctx: &HotelContext,
        user_id: &str,
    ) -> Result<Option<String>, StorageError> {
        Ok(self
            .refresh_jti
            .read()
            .ok()
            .and_then(|map| map.get(user_id).cloned()))
    }

    async fn set_refresh_jti(
        &self,
        ctx: &HotelContext,
        user_id: &str,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let exists = self
            .users
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .values()
            .any(|user| user.user_id == user_id && visible(ctx, user));
        if !exists {
            return Ok(false);
        }
        let mut map = self
            .refresh_jti
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match refresh_jti {
            Some(jti) => {
                map.insert(user_id.to_string(), jti.to_string());
            }
            None => {
                map.remove(user_id);
            }
        }
        Ok(true)
    }
}
