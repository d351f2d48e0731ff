//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查与认证：/health, /livez, /readyz, /login, /register, /refresh-token
//! - 预订：/bookings/*, /my/bookings
//! - 房间：/rooms/*
//! - 库存与采购：/inventory/*, /inventory-dashboard/*, /purchase-orders/*
//! - 员工与支付：/staff/*, /payments/*
//! - 看板与营收：/dashboard/stats/*, /revenue/*
//! - 报表：/reports/*, /export-logs
//! - 联系申请：/contact-requests/*
//! - 指标：/metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
///
/// 返回包含所有 API 端点的 Router，支持 / 和 /api/ 两种前缀
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh-token", post(refresh_token))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/import", post(import_bookings))
        .route(
            "/bookings/:booking_id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/bookings/:booking_id/status", put(update_booking_status))
        .route("/bookings/:booking_id/archive", post(archive_booking))
        .route("/my/bookings", get(my_bookings))
        .route("/rooms", get(list_rooms).post(create_room))
        .route(
            "/rooms/:room_id",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/inventory", get(list_items).post(create_item))
        .route("/inventory/low-stock", get(low_stock_items))
        .route(
            "/inventory/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/inventory/:item_id/adjust", post(adjust_stock))
        .route(
            "/inventory-dashboard/get-dashboard-stats",
            get(inventory_dashboard_stats),
        )
        .route(
            "/inventory-dashboard/get-dashboard-chart",
            get(inventory_dashboard_chart),
        )
        .route(
            "/inventory-dashboard/get-dashboard-activity",
            get(inventory_dashboard_activity),
        )
        .route("/purchase-orders", get(list_orders).post(create_order))
        .route("/purchase-orders/:order_id/status", put(update_order_status))
        .route("/staff", get(list_staff).post(create_staff))
        .route("/staff/summary", get(staff_summary))
        .route("/staff/roles/:role/permissions", get(role_permissions))
        .route(
            "/staff/:staff_id",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/summary", get(payment_summary))
        .route("/payments/:payment_id", get(get_payment))
        .route("/payments/:payment_id/status", put(update_payment_status))
        .route("/dashboard/stats", get(get_dashboard_stats))
        .route("/dashboard/stats/refresh", post(refresh_dashboard_stats))
        .route("/dashboard/stats/stream", get(stream_dashboard_stats))
        .route("/revenue/weekly", get(weekly_revenue))
        .route("/revenue/profit", get(profit))
        .route("/reports", get(list_reports).post(generate_report))
        .route("/reports/:report_id", get(get_report))
        .route("/reports/:report_id/export", get(export_report))
        .route("/export-logs", get(list_export_logs))
        .route(
            "/contact-requests",
            get(list_contact_requests).post(submit_contact_request),
        )
        .route("/contact-requests/:request_id", get(get_contact_request))
        .route(
            "/contact-requests/:request_id/status",
            put(update_contact_status),
        )
        .route("/metrics", get(get_metrics))
}

#[cfg(test)]
mod tests {
    use crate::build_app;
    use crate::state::testing::{admin_headers, read_json, seeded_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_under_both_prefixes() {
        let app = build_app(seeded_state());
        for uri in ["/health", "/api/health"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(response.headers().contains_key("x-request-id"));
        }
    }

    #[tokio::test]
    async fn login_then_read_dashboard() {
        let app = build_app(seeded_state());
        let login = Request::post("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"admin","password":"admin123"}"#))
            .expect("request");
        let body = read_json(app.clone().oneshot(login).await.expect("response")).await;
        let token = body["data"]["accessToken"].as_str().expect("token").to_string();

        let stats = Request::get("/api/dashboard/stats")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(stats).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalRooms"], 6);
    }

    #[tokio::test]
    async fn static_segments_win_over_ids() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let app = build_app(state);
        let mut request = Request::get("/payments/summary")
            .body(Body::empty())
            .expect("request");
        *request.headers_mut() = headers;
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["totalTransactions"], 3);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = build_app(seeded_state());
        let response = app
            .oneshot(
                Request::get("/api/staff")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["code"], "AUTH.UNAUTHORIZED");
    }
}
