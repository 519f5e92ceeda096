use crate::shared::infrastructure::gateway::{Gateway, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, TransportError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let err = status_error(status, &bytes);
            tracing::warn!(%status, error = %err, "gateway request failed");
            return Err(err);
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_decode() {
        TransportError::MalformedResponse(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}

/// The API puts a human readable reason in `message`; fall back to the status text.
fn status_error(status: StatusCode, body: &[u8]) -> TransportError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
    TransportError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, TransportError> {
        tracing::debug!(url, ?params, "GET");
        self.send(self.request(Method::GET, url).query(params)).await
    }

    async fn post(&self, url: &str, data: &Value) -> Result<Value, TransportError> {
        tracing::debug!(url, "POST");
        self.send(self.request(Method::POST, url).json(data)).await
    }

    async fn put(&self, url: &str, data: &Value) -> Result<Value, TransportError> {
        tracing::debug!(url, "PUT");
        self.send(self.request(Method::PUT, url).json(data)).await
    }

    async fn del(&self, url: &str) -> Result<Value, TransportError> {
        tracing::debug!(url, "DELETE");
        self.send(self.request(Method::DELETE, url)).await
    }
}
