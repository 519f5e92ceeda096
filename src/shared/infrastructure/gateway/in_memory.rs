// In memory implementation of the Gateway port.
//
// Purpose
// - Support model tests and local development without a running membership API.
//
// Responsibilities
// - Keep rows per registered resource root and answer the resource protocol like the API does:
//   `{"data": ...}` bodies, numeric ids assigned on create, 404 for unknown ids.
// - Record every request so tests can assert which calls were (or were not) made.

use crate::shared::infrastructure::gateway::{Gateway, TransportError};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    Get {
        url: String,
        params: Vec<(String, String)>,
    },
    Post {
        url: String,
        data: Value,
    },
    Put {
        url: String,
        data: Value,
    },
    Delete {
        url: String,
    },
}

#[derive(Debug, Default)]
struct Resource {
    id_key: String,
    next_id: i64,
    rows: Vec<Map<String, Value>>,
}

impl Resource {
    fn position(&self, id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(&self.id_key).map(segment).as_deref() == Some(id))
    }

    fn assign_id(&mut self, mut row: Map<String, Value>) -> Map<String, Value> {
        self.next_id += 1;
        row.insert(self.id_key.clone(), json!(self.next_id));
        row
    }
}

/// Renders a JSON value the way it appears in a url or query string.
fn segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn object(data: &Value) -> Result<Map<String, Value>, TransportError> {
    data.as_object().cloned().ok_or_else(|| TransportError::Status {
        status: 422,
        message: "request body must be an object".to_string(),
    })
}

#[derive(Default)]
pub struct InMemoryGateway {
    resources: RwLock<HashMap<String, Resource>>,
    requests: Mutex<Vec<GatewayRequest>>,
    is_offline: bool,
    delay_ms: u64,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, root: &str, id_key: &str) -> Self {
        self.resources.get_mut().insert(
            root.to_string(),
            Resource {
                id_key: id_key.to_string(),
                ..Resource::default()
            },
        );
        self
    }

    /// Stores a row as if it had been created through the API and returns its id.
    /// Fails like a create request would: 404 for an unregistered root, 422 for a non-object row.
    pub fn seed(&mut self, root: &str, row: Value) -> Result<i64, TransportError> {
        let resource = self
            .resources
            .get_mut()
            .get_mut(root)
            .ok_or_else(|| TransportError::not_found(root))?;
        let row = resource.assign_id(object(&row)?);
        resource.rows.push(row);
        Ok(resource.next_id)
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Every request sleeps this long before it is answered.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub async fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn rows(&self, root: &str) -> Vec<Map<String, Value>> {
        self.resources
            .read()
            .await
            .get(root)
            .map(|r| r.rows.clone())
            .unwrap_or_default()
    }

    async fn begin(&self, request: GatewayRequest) -> Result<(), TransportError> {
        tracing::debug!(?request, "in-memory gateway request");
        self.requests.lock().await.push(request);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.is_offline {
            return Err(TransportError::Connection("gateway offline".into()));
        }
        Ok(())
    }
}

fn split_item_url(url: &str) -> Option<(&str, &str)> {
    url.rsplit_once('/').filter(|(root, id)| !root.is_empty() && !id.is_empty())
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, TransportError> {
        self.begin(GatewayRequest::Get {
            url: url.to_string(),
            params: params.to_vec(),
        })
        .await?;
        let resources = self.resources.read().await;

        if let Some(resource) = resources.get(url) {
            let rows: Vec<Value> = resource
                .rows
                .iter()
                .filter(|row| {
                    params.iter().all(|(key, wanted)| {
                        row.get(key).map(segment).as_deref() == Some(wanted.as_str())
                    })
                })
                .cloned()
                .map(Value::Object)
                .collect();
            return Ok(json!({ "data": rows, "last_page": 1 }));
        }

        let (root, id) = split_item_url(url).ok_or_else(|| TransportError::not_found(url))?;
        let resource = resources.get(root).ok_or_else(|| TransportError::not_found(url))?;
        let index = resource.position(id).ok_or_else(|| TransportError::not_found(url))?;
        Ok(json!({ "data": resource.rows[index] }))
    }

    async fn post(&self, url: &str, data: &Value) -> Result<Value, TransportError> {
        self.begin(GatewayRequest::Post {
            url: url.to_string(),
            data: data.clone(),
        })
        .await?;
        let mut resources = self.resources.write().await;
        let resource = resources
            .get_mut(url)
            .ok_or_else(|| TransportError::not_found(url))?;
        let row = resource.assign_id(object(data)?);
        resource.rows.push(row.clone());
        Ok(json!({ "data": row }))
    }

    async fn put(&self, url: &str, data: &Value) -> Result<Value, TransportError> {
        self.begin(GatewayRequest::Put {
            url: url.to_string(),
            data: data.clone(),
        })
        .await?;
        let mut resources = self.resources.write().await;
        let (root, id) = split_item_url(url).ok_or_else(|| TransportError::not_found(url))?;
        let resource = resources
            .get_mut(root)
            .ok_or_else(|| TransportError::not_found(url))?;
        let index = resource.position(id).ok_or_else(|| TransportError::not_found(url))?;
        let mut row = object(data)?;
        let id_value = resource.rows[index]
            .get(&resource.id_key)
            .cloned()
            .unwrap_or(Value::Null);
        row.insert(resource.id_key.clone(), id_value);
        resource.rows[index] = row.clone();
        Ok(json!({ "data": row }))
    }

    async fn del(&self, url: &str) -> Result<Value, TransportError> {
        self.begin(GatewayRequest::Delete {
            url: url.to_string(),
        })
        .await?;
        let mut resources = self.resources.write().await;
        let (root, id) = split_item_url(url).ok_or_else(|| TransportError::not_found(url))?;
        let resource = resources
            .get_mut(root)
            .ok_or_else(|| TransportError::not_found(url))?;
        let index = resource.position(id).ok_or_else(|| TransportError::not_found(url))?;
        resource.rows.remove(index);
        Ok(json!({ "status": "deleted" }))
    }
}
