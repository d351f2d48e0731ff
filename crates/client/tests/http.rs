use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use hms_client::{ApiClient, ClientError, FAILED_MESSAGE};
use serde_json::{Value, json};

async fn spawn_server() -> String {
    let app = Router::new()
        .route(
            "/bookings/:id",
            get(|Path(id): Path<String>| async move {
                Json(json!({"success": true, "message": "ok", "data": {"bookingId": id}}))
            })
            .delete(|| async { Json(json!({"success": true, "message": "deleted", "data": null})) }),
        )
        .route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                let token = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({"success": true, "message": "ok", "data": token}))
            }),
        )
        .route(
            "/contact-requests",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "message": "Invalid booking reference format",
                        "data": null,
                        "code": "INVALID.REQUEST"
                    })),
                )
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({"success": true, "message": "created", "data": body}))
            }),
        )
        .route("/plain-error", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }))
        .route("/garbage", get(|| async { "not an envelope" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn decodes_envelope_data() {
    let base = spawn_server().await;
    let client = ApiClient::new(format!("{base}/")).expect("client");

    let booking: Value = client.get("/bookings/BK0123456789").await.expect("get");
    assert_eq!(booking["bookingId"], "BK0123456789");

    let echoed: Value = client
        .post("contact-requests", &json!({"message": "hi"}))
        .await
        .expect("post");
    assert_eq!(echoed["message"], "hi");

    let () = client.delete("/bookings/BK0123456789").await.expect("delete");
}

#[tokio::test]
async fn sends_bearer_token() {
    let base = spawn_server().await;
    let client = ApiClient::new(base).expect("client").with_token("abc");
    let header: String = client.get("/whoami").await.expect("whoami");
    assert_eq!(header, "Bearer abc");
}

#[tokio::test]
async fn http_errors_carry_status_and_message() {
    let base = spawn_server().await;
    let client = ApiClient::new(base).expect("client");

    let err = client
        .get::<Value>("/contact-requests")
        .await
        .expect_err("400");
    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            message: "Invalid booking reference format".to_string()
        }
    );

    let err = client.get::<Value>("/plain-error").await.expect_err("503");
    assert_eq!(
        err,
        ClientError::Api {
            status: 503,
            message: "Service Unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn transport_and_decode_failures_are_generic() {
    let base = spawn_server().await;
    let client = ApiClient::new(base).expect("client");
    let err = client.get::<Value>("/garbage").await.expect_err("decode");
    assert_eq!(err, ClientError::Failed(FAILED_MESSAGE.to_string()));

    let unreachable = ApiClient::new("http://127.0.0.1:9").expect("client");
    let err = unreachable.get::<Value>("/health").await.expect_err("connect");
    assert_eq!(err, ClientError::Failed(FAILED_MESSAGE.to_string()));
}
