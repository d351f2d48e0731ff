//! 进程内计数指标：`GET /metrics`

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::metrics_to_dto;
use crate::utils::response::ok;
use axum::{extract::State, http::HeaderMap, response::Response};
use domain::permissions;

pub async fn get_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers, permissions::SYSTEM_METRICS_READ) {
        return response;
    }
    ok(metrics_to_dto(hms_telemetry::metrics().snapshot()))
}
