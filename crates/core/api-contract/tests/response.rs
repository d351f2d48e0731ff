use api_contract::ApiResponse;

#[test]
fn api_response_success() {
    let response = ApiResponse::success("ok");
    assert!(response.success);
    assert_eq!(response.message, "ok");
    assert!(response.data.is_some());
    assert!(response.code.is_none());
}

#[test]
fn api_response_error() {
    let response = ApiResponse::<()>::error("AUTH.UNAUTHORIZED", "unauthorized");
    assert!(!response.success);
    assert_eq!(response.message, "unauthorized");
    assert!(response.data.is_none());
    assert_eq!(response.code.as_deref(), Some("AUTH.UNAUTHORIZED"));
}

#[test]
fn envelope_has_success_message_data() {
    let value = serde_json::to_value(ApiResponse::success(vec![1, 2])).expect("serialize");
    assert_eq!(value["success"], serde_json::json!(true));
    assert_eq!(value["message"], serde_json::json!("ok"));
    assert_eq!(value["data"], serde_json::json!([1, 2]));
    assert!(value.get("code").is_none());
}

#[test]
fn envelope_without_code_deserializes() {
    let payload = r#"{"success":false,"message":"booking not found","data":null}"#;
    let response: ApiResponse<()> = serde_json::from_str(payload).expect("parse");
    assert!(!response.success);
    assert_eq!(response.message, "booking not found");
    assert!(response.code.is_none());
}
