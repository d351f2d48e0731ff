//! 联系/取消申请 handlers
//!
//! - `POST /contact-requests`：客人提交，带预订号时校验格式、存在性与归属
//! - `GET /contact-requests?status=`、`GET /contact-requests/:request_id`
//! - `PUT /contact-requests/:request_id/status`

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::contact_request_to_dto;
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{parse_enum, parse_optional_enum};
use api_contract::{ContactRequestDto, StatusQuery, SubmitContactRequest, UpdateStatusRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use domain::{ContactStatus, InquiryType, permissions};
use hms_contact::{ContactError, ContactSubmission};
use hms_storage::{ChangeKind, Collection};

#[derive(serde::Deserialize)]
pub struct ContactPath {
    request_id: String,
}

/// 输入类错误原样返回提示信息。
fn contact_error(err: ContactError) -> Response {
    match err {
        ContactError::NotFound => not_found_error(),
        ContactError::Storage(err) => storage_error(err),
        other => bad_request_error(other.to_string()),
    }
}

pub async fn submit_contact_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitContactRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::CONTACT_SUBMIT) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let inquiry_type = match parse_enum::<InquiryType>(&req.inquiry_type, "inquiryType") {
        Ok(inquiry_type) => inquiry_type,
        Err(response) => return response,
    };
    let submission = ContactSubmission {
        name: req.name,
        email: req.email,
        phone: req.phone,
        inquiry_type,
        booking_reference: req.booking_reference,
        subject: req.subject,
        message: req.message,
    };
    match state.contact.submit(&ctx, submission).await {
        Ok(record) => {
            state.publish_change(
                &ctx,
                Collection::ContactRequests,
                &record.request_id,
                ChangeKind::Created,
            );
            ok(contact_request_to_dto(record))
        }
        Err(err) => contact_error(err),
    }
}

pub async fn list_contact_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::CONTACT_MANAGE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let status = match parse_optional_enum::<ContactStatus>(query.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    match state.contact.list(&ctx, status).await {
        Ok(records) => {
            let data: Vec<ContactRequestDto> =
                records.into_iter().map(contact_request_to_dto).collect();
            ok(data)
        }
        Err(err) => contact_error(err),
    }
}

pub async fn get_contact_request(
    State(state): State<AppState>,
    Path(path): Path<ContactPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::CONTACT_MANAGE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.contact.get(&ctx, &path.request_id).await {
        Ok(record) => ok(contact_request_to_dto(record)),
        Err(err) => contact_error(err),
    }
}

pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(path): Path<ContactPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::CONTACT_MANAGE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let status = match parse_enum::<ContactStatus>(&req.status, "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    match state
        .contact
        .update_status(&ctx, &path.request_id, status)
        .await
    {
        Ok(record) => {
            state.publish_change(
                &ctx,
                Collection::ContactRequests,
                &record.request_id,
                ChangeKind::Updated,
            );
            ok(contact_request_to_dto(record))
        }
        Err(err) => contact_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{admin_headers, guest_headers, read_json, seeded_state};
    use axum::http::StatusCode;

    fn submission(inquiry_type: &str, reference: Option<&str>) -> SubmitContactRequest {
        SubmitContactRequest {
            name: "Grace Lee".to_string(),
            email: "grace@example.com".to_string(),
            phone: None,
            inquiry_type: inquiry_type.to_string(),
            booking_reference: reference.map(str::to_string),
            subject: Some("Change of plans".to_string()),
            message: "Please cancel my stay.".to_string(),
        }
    }

    #[tokio::test]
    async fn guest_cancels_own_booking() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response = submit_contact_request(
            State(state),
            headers,
            Json(submission("cancellation", Some(" BK1761629700001a1b2c3d4e "))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["bookingReference"], "BK1761629700001a1b2c3d4e");
        assert_eq!(body["data"]["status"], "pending");
        let reference = body["data"]["referenceNumber"].as_str().expect("reference");
        assert!(reference.starts_with("REQ-"));
    }

    #[tokio::test]
    async fn archived_booking_is_found() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response = submit_contact_request(
            State(state),
            headers,
            Json(submission("modification", Some("BK1761629662783i7bw7dtsz"))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejections_carry_messages() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let cases = [
            ("cancellation", None, "A booking reference is required"),
            ("cancellation", Some("BK123"), "Invalid booking reference format"),
            ("cancellation", Some("BK9999999999999"), "Booking reference not found"),
            (
                "cancellation",
                Some("BK1761629700002f5g6h7i8j"),
                "This booking does not belong to your account",
            ),
        ];
        for (inquiry_type, reference, expected) in cases {
            let response = submit_contact_request(
                State(state.clone()),
                headers.clone(),
                Json(submission(inquiry_type, reference)),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = read_json(response).await;
            let message = body["message"].as_str().expect("message");
            assert!(message.starts_with(expected), "{message}");
        }
    }

    #[tokio::test]
    async fn general_inquiry_needs_no_reference() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response = submit_contact_request(
            State(state),
            headers,
            Json(submission("general", Some("   "))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn guest_cannot_manage_requests() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response =
            list_contact_requests(State(state), headers, Query(StatusQuery::default())).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn resolved_request_stays_resolved() {
        let state = seeded_state();
        let guest = guest_headers(&state).await;
        let admin = admin_headers(&state).await;
        let body = read_json(
            submit_contact_request(
                State(state.clone()),
                guest,
                Json(submission("feedback", None)),
            )
            .await,
        )
        .await;
        let request_id = body["data"]["requestId"].as_str().expect("id").to_string();

        let update = |status: &str| UpdateStatusRequest {
            status: status.to_string(),
        };
        let response = update_contact_status(
            State(state.clone()),
            Path(ContactPath {
                request_id: request_id.clone(),
            }),
            admin.clone(),
            Json(update("resolved")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = update_contact_status(
            State(state.clone()),
            Path(ContactPath {
                request_id: request_id.clone(),
            }),
            admin.clone(),
            Json(update("in-progress")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let query = StatusQuery {
            status: Some("resolved".to_string()),
        };
        let body = read_json(list_contact_requests(State(state), admin, Query(query)).await).await;
        assert_eq!(body["data"].as_array().expect("list").len(), 1);
    }
}
