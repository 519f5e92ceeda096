// List of entities fetched from a resource root, optionally filtered by query params.
//
// Responsibilities
// - Fetch `GET <root>?<params>` and replace the items with the returned rows.
// - Notify subscribers like a single entity does.

use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::errors::ModelError;
use crate::modules::entities::core::model::Model;
use crate::modules::entities::core::observers::{Observers, Subscription};
use crate::shared::infrastructure::gateway::{Gateway, TransportError};
use serde_json::Value;
use std::sync::Arc;

pub struct Collection<M: Model> {
    gateway: Arc<dyn Gateway>,
    params: Vec<(String, String)>,
    items: Vec<Entity<M>>,
    observers: Observers,
}

impl<M: Model> Collection<M> {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            params: Vec::new(),
            items: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn items(&self) -> &[Entity<M>] {
        &self.items
    }

    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn notify(&self) {
        self.observers.notify();
    }

    /// Replaces the items with the current rows on the server. Items are kept on failure.
    pub async fn fetch(&mut self) -> Result<(), ModelError> {
        let body = self.gateway.get(M::ROOT, &self.params).await?;
        let rows = match body {
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(TransportError::MalformedResponse(
                        "response has no data list".into(),
                    )
                    .into());
                }
            },
            _ => {
                return Err(
                    TransportError::MalformedResponse("response is not an object".into()).into(),
                );
            }
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(data) = row else {
                return Err(
                    TransportError::MalformedResponse("list row is not an object".into()).into(),
                );
            };
            items.push(Entity::from_data(self.gateway.clone(), data));
        }
        tracing::debug!(model = M::NAME, count = items.len(), "fetched collection");
        self.items = items;
        self.notify();
        Ok(())
    }
}
