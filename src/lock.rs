//! Per-instance lock registry
//!
//! Mutations against one remote database instance must not race each
//! other, so they serialize on an advisory lock keyed by the instance
//! identifier. Reads take no lock. The registry hands out owned guards;
//! release happens on drop, on every exit path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of advisory locks keyed by instance id
#[derive(Debug, Default)]
pub struct InstanceLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl InstanceLocks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for an instance, waiting if another holder is
    /// active. The lock is scoped to this one instance id; other ids do
    /// not contend.
    pub async fn acquire(&self, instance_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.locks.lock().expect("lock registry poisoned");
            registry
                .entry(instance_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of instance ids the registry has seen
    pub fn len(&self) -> usize {
        self.locks.lock().expect("lock registry poisoned").len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
