//! 认证相关 handlers：健康检查、登录、访客注册、刷新 token
//!
//! ## 公开端点
//! - `GET /health`、`GET /livez`：进程存活
//! - `GET /readyz`：Postgres 后端时检查连接
//! - `POST /login`：用户名密码登录
//! - `POST /register`：注册访客账户（默认酒店，仅可提交联系申请）
//! - `POST /refresh-token`：refresh token 轮换

use crate::AppState;
use crate::utils::response::{
    auth_error, bad_request_error, conflict_error, internal_auth_error, ok,
};
use api_contract::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hms_auth::{AuthError, AuthTokens};
use hms_storage::UserRecord;
use tracing::info;

pub async fn health() -> impl IntoResponse {
    livez().await
}

/// Liveness 探针：只反映进程存活，不做外部依赖检查。
pub async fn livez() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// Readiness 探针：内存后端总是就绪。
pub async fn readyz(State(state): State<AppState>) -> Response {
    let Some(pool) = state.db_pool.as_ref() else {
        return (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response();
    };

    match sqlx::query_scalar::<_, i32>("select 1").fetch_one(pool).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "readyz check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "ok": false })),
            )
                .into_response()
        }
    }
}

/// `expires` 为毫秒时间戳。
fn login_response(user: UserRecord, tokens: AuthTokens) -> LoginResponse {
    LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires: tokens.expires_at.saturating_mul(1000),
        user_id: user.user_id,
        hotel_id: user.hotel_id,
        username: user.username,
        roles: user.roles,
        permissions: user.permissions,
    }
}

pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.username, &req.password).await {
        Ok((user, tokens)) => {
            info!(user_id = %user.user_id, hotel_id = %user.hotel_id, "user logged in");
            ok(login_response(user, tokens))
        }
        Err(AuthError::InvalidCredentials) => auth_error(StatusCode::UNAUTHORIZED),
        Err(err) => internal_auth_error(err),
    }
}

pub async fn register(State(state): State<AppState>, Json(req): Json<RegisterRequest>) -> Response {
    match state
        .auth
        .register_guest(&state.default_hotel_id, &req.username, &req.password)
        .await
    {
        Ok((user, tokens)) => {
            info!(user_id = %user.user_id, hotel_id = %user.hotel_id, "guest registered");
            ok(login_response(user, tokens))
        }
        Err(AuthError::UsernameTaken) => conflict_error("username already taken"),
        Err(AuthError::InvalidInput(message)) => bad_request_error(message),
        Err(err) => internal_auth_error(err),
    }
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    match state.auth.refresh(&req.refresh_token).await {
        Ok(tokens) => ok(RefreshTokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires: tokens.expires_at.saturating_mul(1000),
        }),
        Err(AuthError::TokenInvalid | AuthError::TokenExpired) => {
            auth_error(StatusCode::UNAUTHORIZED)
        }
        Err(err) => internal_auth_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{bearer, seeded_state};
    use crate::middleware::require_hotel_context;

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = seeded_state();
        let response = login(
            State(state),
            Json(LoginRequest {
                username: "admin".to_string(),
                password: "nope".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn register_creates_guest_once() {
        let state = seeded_state();
        let request = || RegisterRequest {
            username: "walter".to_string(),
            password: "secret-pass".to_string(),
        };
        let response = register(State(state.clone()), Json(request())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = register(State(state.clone()), Json(request())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let (user, tokens) = state.auth.login("walter", "secret-pass").await.expect("login");
        assert_eq!(user.roles, vec!["guest".to_string()]);
        let ctx = require_hotel_context(&state, &bearer(&tokens.access_token)).expect("ctx");
        assert_eq!(ctx.hotel_id, "hotel-1");
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let state = seeded_state();
        let response = register(
            State(state),
            Json(RegisterRequest {
                username: "walter".to_string(),
                password: "abc".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_token_rotates() {
        let state = seeded_state();
        let (_, tokens) = state.auth.login("admin", "admin123").await.expect("login");
        let response = refresh_token(
            State(state.clone()),
            Json(RefreshTokenRequest {
                refresh_token: tokens.refresh_token.clone(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = refresh_token(
            State(state),
            Json(RefreshTokenRequest {
                refresh_token: tokens.refresh_token,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn readyz_without_pool_is_ready() {
        let response = readyz(State(seeded_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
