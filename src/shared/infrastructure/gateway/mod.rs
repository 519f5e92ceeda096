// The gateway port is the only way the client reaches the membership API.
//
// Purpose
// - Describe the remote resource protocol (GET, POST, PUT, DELETE on a resource root) as a trait.
//
// Responsibilities
// - Resolve every call to the parsed JSON body, or fail with a TransportError.
// - Never retry and never interpret failures. Callers decide what an error means.
//
// Boundaries
// - Adapters live next to this file: `http` talks to a real server, `in_memory` serves tests
//   and local development.

pub mod http;
pub mod in_memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    pub fn not_found(url: &str) -> Self {
        TransportError::Status {
            status: 404,
            message: format!("{url} not found"),
        }
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, TransportError>;
    async fn post(&self, url: &str, data: &Value) -> Result<Value, TransportError>;
    async fn put(&self, url: &str, data: &Value) -> Result<Value, TransportError>;
    async fn del(&self, url: &str) -> Result<Value, TransportError>;
}
