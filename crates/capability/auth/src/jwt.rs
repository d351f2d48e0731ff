use crate::{AuthError, AuthTokens};
use domain::HotelContext;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// token 用途，写入 claims 的 `typ` 字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenKind {
    Access,
    Refresh,
}

/// JWT 内部 claims。
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    hotel_id: String,
    roles: Vec<String>,
    permissions: Vec<String>,
    iat: u64,
    exp: u64,
    typ: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

impl Claims {
    fn into_context(self) -> (HotelContext, Option<String>) {
        let ctx = HotelContext::new(self.hotel_id, self.sub, self.roles, self.permissions);
        (ctx, self.jti)
    }
}

/// JWT 生成与校验（HS256）。
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl JwtManager {
    pub fn new(secret: String, access_ttl_seconds: u64, refresh_ttl_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }

    /// 基于 HotelContext 签发 access/refresh token，refresh 带新的 jti。
    pub fn issue_tokens(&self, ctx: &HotelContext) -> Result<AuthTokens, AuthError> {
        let now = now_epoch_seconds();
        let access_token = self.encode(ctx, now, TokenKind::Access, None)?;
        let refresh_jti = Uuid::new_v4().to_string();
        let refresh_token = self.encode(ctx, now, TokenKind::Refresh, Some(refresh_jti.clone()))?;
        Ok(AuthTokens {
            access_token,
            refresh_token,
            refresh_jti,
            expires_at: now + self.access_ttl_seconds,
        })
    }

    pub fn decode_access(&self, token: &str) -> Result<HotelContext, AuthError> {
        let (ctx, _) = self.decode(token, TokenKind::Access)?;
        Ok(ctx)
    }

    pub fn decode_refresh(&self, token: &str) -> Result<HotelContext, AuthError> {
        let (ctx, _) = self.decode(token, TokenKind::Refresh)?;
        Ok(ctx)
    }

    /// 解析 refresh token 并返回其 jti（缺失视为无效）。
    pub fn decode_refresh_with_jti(&self, token: &str) -> Result<(HotelContext, String), AuthError> {
        let (ctx, jti) = self.decode(token, TokenKind::Refresh)?;
        let jti = jti.ok_or(AuthError::TokenInvalid)?;
        Ok((ctx, jti))
    }

    fn encode(
        &self,
        ctx: &HotelContext,
        now: u64,
        kind: TokenKind,
        jti: Option<String>,
    ) -> Result<String, AuthError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        };
        let claims = Claims {
            sub: ctx.user_id.clone(),
            hotel_id: ctx.hotel_id.clone(),
            roles: ctx.roles.clone(),
            permissions: ctx.permissions.clone(),
            iat: now,
            exp: now + ttl,
            typ: kind,
            jti,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AuthError::Internal(err.to_string()))
    }

    fn decode(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<(HotelContext, Option<String>), AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(map_jwt_error)?
            .claims;
        if claims.typ != expected {
            return Err(AuthError::TokenInvalid);
        }
        Ok(claims.into_context())
    }
}

fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    }
}
