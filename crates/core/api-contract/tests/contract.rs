use api_contract::{
    BookingDto, ImportBookingDocument, LoginResponse, RefreshTokenRequest, SubmitContactRequest,
};
use domain::{BookingStatus, DocumentTimestamp};
use serde_json::Value;

#[test]
fn login_response_is_camel_case() {
    let response = LoginResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires: 1_700_000_000_000,
        user_id: "user-1".to_string(),
        hotel_id: "hotel-1".to_string(),
        username: "admin".to_string(),
        roles: vec!["admin".to_string()],
        permissions: vec![],
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert!(value.get("accessToken").is_some());
    assert!(value.get("refreshToken").is_some());
    assert!(value.get("hotelId").is_some());
    assert!(matches!(value.get("expires"), Some(Value::Number(_))));
    assert!(value.get("access_token").is_none());
}

#[test]
fn refresh_token_request_accepts_both_cases() {
    let camel: RefreshTokenRequest =
        serde_json::from_str(r#"{"refreshToken":"token-1"}"#).expect("camel");
    let snake: RefreshTokenRequest =
        serde_json::from_str(r#"{"refresh_token":"token-2"}"#).expect("snake");
    assert_eq!(camel.refresh_token, "token-1");
    assert_eq!(snake.refresh_token, "token-2");
}

#[test]
fn booking_status_serializes_kebab_case() {
    let booking = BookingDto {
        booking_id: "BK1761629662783i7bw7dtsz".to_string(),
        hotel_id: "hotel-1".to_string(),
        guest_user_id: "user-2".to_string(),
        guest_name: "Ada".to_string(),
        guest_email: None,
        room_number: "101".to_string(),
        check_in_date: "2024-01-01".to_string(),
        check_out_date: "2024-01-03".to_string(),
        status: BookingStatus::CheckedIn,
        total_amount: 240.0,
        archived: false,
        created_at_ms: 0,
        updated_at_ms: 0,
    };
    let value = serde_json::to_value(booking).expect("serialize");
    assert_eq!(value["status"], Value::String("checked-in".to_string()));
    assert_eq!(value["checkInDate"], Value::String("2024-01-01".to_string()));
}

#[test]
fn import_document_accepts_timestamp_wrapper() {
    let payload = r#"{
        "guestName": "Ada",
        "checkInDate": {"seconds": 1704067200, "nanoseconds": 0},
        "status": "confirmed",
        "totalAmount": 120.5
    }"#;
    let doc: ImportBookingDocument = serde_json::from_str(payload).expect("parse");
    assert!(matches!(doc.check_in_date, DocumentTimestamp::Wrapper { .. }));
    assert_eq!(doc.room_number, "");
    assert!(doc.check_out_date.is_none());
}

#[test]
fn contact_request_reference_is_optional() {
    let payload = r#"{
        "name": "Ada",
        "email": "ada@example.com",
        "inquiryType": "general",
        "message": "Is breakfast included?"
    }"#;
    let req: SubmitContactRequest = serde_json::from_str(payload).expect("parse");
    assert!(req.booking_reference.is_none());
    assert_eq!(req.inquiry_type, "general");
}
