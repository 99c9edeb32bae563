//! Mutation dispatch
//!
//! Create/update/delete calls against sub-resources of a database
//! instance (accounts, databases, privileges). Every mutation serializes
//! on the target instance's advisory lock for the duration of the call;
//! reads never go through here and take no lock.

use crate::error::Result;
use crate::http::{ApiClient, RequestConfig};
use crate::lock::InstanceLocks;
use crate::types::{JsonValue, Verb};
use serde_json::Value;
use tracing::debug;

/// Dispatches instance-scoped mutations under the per-instance lock
#[derive(Debug)]
pub struct MutationDispatcher {
    client: ApiClient,
    locks: InstanceLocks,
}

impl MutationDispatcher {
    /// Create a dispatcher over the given client
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            locks: InstanceLocks::new(),
        }
    }

    /// The lock registry, shared with any other mutation path that must
    /// coordinate on the same instances
    pub fn locks(&self) -> &InstanceLocks {
        &self.locks
    }

    /// Execute a mutation against a rendered path, holding the target
    /// instance's lock until the response arrives.
    pub async fn execute(
        &self,
        instance_id: &str,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> Result<JsonValue> {
        let _guard = self.locks.acquire(instance_id).await;
        debug!("mutation: {:?} {} (instance {})", verb, path, instance_id);

        let mut config = RequestConfig::new();
        if let Some(body) = body {
            config = config.json(body);
        }

        let response = self.client.send(verb, path, &config).await?;

        // Mutation responses are often empty; only parse what is there
        let text = response.text().await?;
        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    /// Create a sub-resource (POST with a JSON body)
    pub async fn create(
        &self,
        instance_id: &str,
        path: &str,
        body: Value,
    ) -> Result<JsonValue> {
        self.execute(instance_id, Verb::Post, path, Some(body)).await
    }

    /// Update a sub-resource (PUT with a JSON body)
    pub async fn update(
        &self,
        instance_id: &str,
        path: &str,
        body: Value,
    ) -> Result<JsonValue> {
        self.execute(instance_id, Verb::Put, path, Some(body)).await
    }

    /// Delete a sub-resource
    pub async fn delete(&self, instance_id: &str, path: &str) -> Result<JsonValue> {
        self.execute(instance_id, Verb::Delete, path, None).await
    }
}
