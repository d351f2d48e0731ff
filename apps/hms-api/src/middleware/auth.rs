//! 认证和授权中间件
//!
//! - request_context：注入 request_id/trace_id，并回写到响应头
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - require_hotel_context：校验 access token，得到 HotelContext
//! - require_permission：校验权限码
//! - authorize：上面两步的组合，绝大多数 handler 直接使用

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use domain::HotelContext;
use hms_auth::AuthError;
use hms_telemetry::new_request_ids;
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::{auth_error, forbidden_error, internal_auth_error};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// 验证 token 并提取酒店上下文
pub fn require_hotel_context(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<HotelContext, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err(auth_error(StatusCode::UNAUTHORIZED));
    };
    match state.auth.verify_access_token(token) {
        Ok(ctx) => Ok(ctx),
        Err(AuthError::TokenInvalid | AuthError::TokenExpired) => {
            Err(auth_error(StatusCode::UNAUTHORIZED))
        }
        Err(err) => Err(internal_auth_error(err)),
    }
}

pub fn require_permission(ctx: &HotelContext, code: &str) -> Result<(), Response> {
    if ctx.has_permission(code) {
        Ok(())
    } else {
        Err(forbidden_error())
    }
}

pub fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    code: &str,
) -> Result<HotelContext, Response> {
    let ctx = require_hotel_context(state, headers)?;
    require_permission(&ctx, code)?;
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{bearer, headers_with, seeded_state};
    use domain::permissions;

    #[test]
    fn bearer_token_extracts() {
        let headers = bearer("token-1");
        assert_eq!(bearer_token(&headers), Some("token-1"));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("token-1"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn missing_token_is_unauthorized() {
        let state = seeded_state();
        let response = require_hotel_context(&state, &HeaderMap::new()).expect_err("rejected");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let state = seeded_state();
        let response = require_hotel_context(&state, &bearer("not-a-jwt")).expect_err("rejected");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn authorize_checks_permission() {
        let state = seeded_state();
        let headers = headers_with(&[permissions::ROOM_READ]);
        let ctx = authorize(&state, &headers, permissions::ROOM_READ).expect("allowed");
        assert_eq!(ctx.hotel_id, "hotel-1");
        let response =
            authorize(&state, &headers, permissions::ROOM_WRITE).expect_err("forbidden");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
