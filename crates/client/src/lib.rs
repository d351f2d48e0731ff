//! 后台 API 的 HTTP 客户端。
//!
//! 所有接口返回 `{success, message, data}` 封装，失败策略统一：
//! - HTTP 状态 >= 400：`ClientError::Api`，消息取封装中的 `message`，
//!   响应体不是封装时取状态码描述；
//! - 2xx 但 `success == false`：同样返回 `Api`；
//! - 网络或解码失败：`ClientError::Failed("API calling failed")`。

use api_contract::ApiResponse;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const FAILED_MESSAGE: &str = "API calling failed";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Failed(String),
}

impl ClientError {
    fn failed() -> Self {
        ClientError::Failed(FAILED_MESSAGE.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            tracing::warn!(error = %err, "http client build failed");
            ClientError::failed()
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// 设置 Bearer token。
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "api request failed");
            ClientError::failed()
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            tracing::warn!(error = %err, "api response body unreadable");
            ClientError::failed()
        })?;
        decode_envelope(status, &body)
    }
}

fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ClientResult<T> {
    if status.as_u16() >= 400 {
        let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let envelope: ApiResponse<T> = serde_json::from_slice(body).map_err(|err| {
        tracing::warn!(error = %err, "api envelope decode failed");
        ClientError::failed()
    })?;
    if !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope.message,
        });
    }
    match envelope.data {
        Some(data) => Ok(data),
        // 无数据的成功响应只能解码为 `()` 或 `Option<_>`
        None => serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            tracing::warn!("api envelope missing data");
            ClientError::failed()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_uses_envelope_message() {
        let body = br#"{"success":false,"message":"Booking reference not found","data":null,"code":"INVALID.REQUEST"}"#;
        let err = decode_envelope::<serde_json::Value>(StatusCode::BAD_REQUEST, body)
            .expect_err("400");
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: "Booking reference not found".to_string()
            }
        );
    }

    #[test]
    fn error_status_without_envelope_uses_reason() {
        let err = decode_envelope::<serde_json::Value>(StatusCode::BAD_GATEWAY, b"<html>")
            .expect_err("502");
        assert_eq!(
            err,
            ClientError::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn unsuccessful_envelope_on_ok_is_api_error() {
        let body = br#"{"success":false,"message":"nope","data":null}"#;
        let err = decode_envelope::<serde_json::Value>(StatusCode::OK, body).expect_err("flag");
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn undecodable_success_body_is_generic_failure() {
        let err = decode_envelope::<u32>(StatusCode::OK, b"not json").expect_err("decode");
        assert_eq!(err, ClientError::Failed(FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn null_data_decodes_to_unit() {
        let body = br#"{"success":true,"message":"deleted","data":null}"#;
        let () = decode_envelope(StatusCode::OK, body).expect("unit");
        let err = decode_envelope::<u32>(StatusCode::OK, body).expect_err("missing");
        assert_eq!(err, ClientError::Failed(FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn data_is_returned() {
        let body = br#"{"success":true,"message":"ok","data":42}"#;
        let value: u32 = decode_envelope(StatusCode::OK, body).expect("ok");
        assert_eq!(value, 42);
    }
}
