//! 报表 handlers
//!
//! - `GET/POST /reports`、`GET /reports/:report_id`
//! - `GET /reports/:report_id/export`：返回 CSV 附件并写入导出日志
//! - `GET /export-logs`

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::{export_log_to_dto, report_to_dto};
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::parse_enum;
use api_contract::{ExportLogDto, GenerateReportRequest, ReportDto};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use domain::{ReportType, permissions};
use hms_reports::ReportError;
use hms_storage::{ChangeKind, Collection};

#[derive(serde::Deserialize)]
pub struct ReportPath {
    report_id: String,
}

fn report_error(err: ReportError) -> Response {
    match err {
        ReportError::InvalidPeriod(message) => bad_request_error(message),
        ReportError::NotFound => not_found_error(),
        ReportError::Storage(err) => storage_error(err),
    }
}

pub async fn list_reports(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REPORT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.reports.list(&ctx).await {
        Ok(reports) => {
            let data: Vec<ReportDto> = reports.into_iter().map(report_to_dto).collect();
            ok(data)
        }
        Err(err) => report_error(err),
    }
}

pub async fn generate_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GenerateReportRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REPORT_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let report_type = match parse_enum::<ReportType>(&req.report_type, "reportType") {
        Ok(report_type) => report_type,
        Err(response) => return response,
    };
    match state
        .reports
        .generate(&ctx, report_type, &req.date_from, &req.date_to, &ctx.user_id)
        .await
    {
        Ok(report) => {
            state.publish_change(&ctx, Collection::Reports, &report.report_id, ChangeKind::Created);
            ok(report_to_dto(report))
        }
        Err(err) => report_error(err),
    }
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REPORT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.reports.get(&ctx, &path.report_id).await {
        Ok(report) => ok(report_to_dto(report)),
        Err(err) => report_error(err),
    }
}

/// 需要 `REPORT.READ`；每次导出追加一条导出日志。
pub async fn export_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REPORT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.reports.export(&ctx, &path.report_id, &ctx.user_id).await {
        Ok(export) => {
            state.publish_change(&ctx, Collection::Reports, &export.log.export_id, ChangeKind::Created);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.file_name),
                    ),
                ],
                export.content,
            )
                .into_response()
        }
        Err(err) => report_error(err),
    }
}

pub async fn list_export_logs(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::REPORT_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.reports.export_logs(&ctx).await {
        Ok(logs) => {
            let data: Vec<ExportLogDto> = logs.into_iter().map(export_log_to_dto).collect();
            ok(data)
        }
        Err(err) => report_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{admin_headers, read_json, seeded_state};
    use http_body_util::BodyExt;

    fn request(report_type: &str, from: &str, to: &str) -> GenerateReportRequest {
        GenerateReportRequest {
            report_type: report_type.to_string(),
            date_from: from.to_string(),
            date_to: to.to_string(),
        }
    }

    #[tokio::test]
    async fn generate_rejects_bad_input() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = generate_report(
            State(state.clone()),
            headers.clone(),
            Json(request("forecast", "2024-01-01", "2024-01-31")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = generate_report(
            State(state),
            headers,
            Json(request("revenue", "2024-02-01", "2024-01-01")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_returns_csv_and_logs() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let body = read_json(
            generate_report(
                State(state.clone()),
                headers.clone(),
                Json(request("staff", "2024-01-01", "2024-12-31")),
            )
            .await,
        )
        .await;
        assert_eq!(body["data"]["generatedBy"], "user-1");
        let report_id = body["data"]["reportId"].as_str().expect("id").to_string();

        let response = export_report(
            State(state.clone()),
            Path(ReportPath { report_id }),
            headers.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().expect("header");
        assert!(content_type.starts_with("text/csv"));
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .expect("header")
            .to_string();
        assert!(disposition.contains("filename=\"report_staff_"));
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let csv = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.starts_with('"'));

        let body = read_json(list_export_logs(State(state), headers).await).await;
        let logs = body["data"].as_array().expect("logs");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["rowCount"], 4);
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = export_report(
            State(state),
            Path(ReportPath {
                report_id: "report-missing".to_string(),
            }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
