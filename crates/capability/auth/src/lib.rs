//! 认证能力：登录、访客注册、JWT 签发与刷新轮换。

mod jwt;
mod password;

use async_trait::async_trait;
use domain::HotelContext;
use domain::permissions::{GUEST_PERMISSIONS, ROLE_GUEST};
use hms_storage::{StorageError, StorageErrorKind, UserRecord, UserStore};
use std::sync::Arc;

pub use jwt::JwtManager;
pub use password::{
    MIN_PASSWORD_LEN, PasswordCheck, hash_password, validate_new_password,
    verify_password_and_maybe_upgrade,
};

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("username already taken")]
    UsernameTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// 登录/刷新返回的 token 结构。
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_jti: String,
    pub expires_at: u64,
}

/// 认证服务实现（基于 UserStore + JWT）。
pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    jwt: JwtManager,
}

impl AuthService {
    pub fn new(user_store: Arc<dyn UserStore>, jwt: JwtManager) -> Self {
        Self { user_store, jwt }
    }

    /// 登录校验并签发 token；历史明文密码在首次登录时升级为 argon2。
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        let user = self
            .user_store
            .find_by_username(&HotelContext::default(), username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let check = verify_password_and_maybe_upgrade(&user.password, password)?;
        if !check.verified {
            return Err(AuthError::InvalidCredentials);
        }
        let ctx = user.to_hotel_context();
        if let Some(password_hash) = check.upgrade_hash {
            let updated = self
                .user_store
                .update_password_hash(&ctx, &user.user_id, &password_hash)
                .await?;
            if !updated {
                return Err(AuthError::Internal("password migration update failed".to_string()));
            }
        }
        let tokens = self.bind_new_tokens(&ctx).await?;
        Ok((user, tokens))
    }

    /// 注册访客账户：角色 guest，仅持有访客权限。
    pub async fn register_guest(
        &self,
        hotel_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        let username = username.trim();
        if username.len() < 3 {
            return Err(AuthError::InvalidInput(
                "username must be at least 3 characters".to_string(),
            ));
        }
        validate_new_password(password)?;
        let record = UserRecord {
            hotel_id: hotel_id.to_string(),
            user_id: format!("user-{}", uuid::Uuid::new_v4()),
            username: username.to_string(),
            password: hash_password(password)?,
            roles: vec![ROLE_GUEST.to_string()],
            permissions: GUEST_PERMISSIONS.iter().map(|code| (*code).to_string()).collect(),
        };
        let ctx = HotelContext::new(hotel_id, record.user_id.clone(), vec![], vec![]);
        let user = match self.user_store.create_user(&ctx, record).await {
            Ok(user) => user,
            Err(err) if err.kind() == StorageErrorKind::Conflict => {
                return Err(AuthError::UsernameTaken);
            }
            Err(err) => return Err(err.into()),
        };
        let tokens = self.bind_new_tokens(&user.to_hotel_context()).await?;
        Ok((user, tokens))
    }

    /// 校验 access token 并提取 HotelContext。
    pub fn verify_access_token(&self, token: &str) -> Result<HotelContext, AuthError> {
        self.jwt.decode_access(token)
    }

    /// 使用 refresh token 换取新 token；旧 refresh token 随即失效。
    pub async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        let (ctx, jti) = self.jwt.decode_refresh_with_jti(token)?;
        let stored = self.user_store.get_refresh_jti(&ctx, &ctx.user_id).await?;
        if stored.as_deref() != Some(jti.as_str()) {
            return Err(AuthError::TokenInvalid);
        }
        self.bind_new_tokens(&ctx).await
    }

    async fn bind_new_tokens(&self, ctx: &HotelContext) -> Result<AuthTokens, AuthError> {
        let tokens = self.jwt.issue_tokens(ctx)?;
        let updated = self
            .user_store
            .set_refresh_jti(ctx, &ctx.user_id, Some(&tokens.refresh_jti))
            .await?;
        if !updated {
            return Err(AuthError::Internal("refresh token binding update failed".to_string()));
        }
        Ok(tokens)
    }
}

/// 认证能力 trait，便于替换实现与测试。
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError>;
    async fn register_guest(
        &self,
        hotel_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError>;
    fn verify_access_token(&self, token: &str) -> Result<HotelContext, AuthError>;
    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError>;
}

#[async_trait]
impl Authenticator for AuthService {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        AuthService::login(self, username, password).await
    }

    async fn register_guest(
        &self,
        hotel_id: &str,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        AuthService::register_guest(self, hotel_id, username, password).await
    }

    fn verify_access_token(&self, token: &str) -> Result<HotelContext, AuthError> {
        AuthService::verify_access_token(self, token)
    }

    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        AuthService::refresh(self, token).await
    }
}
