//! In-memory client registry.

use async_trait::async_trait;
use client_auth_core::{ClientAuthError, ClientAuthResult, ClientDetails, ClientDetailsService};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ClientDetailsService`].
///
/// The real registry is expected to live outside this crate (database,
/// remote service); this one backs tests and small embedded deployments.
pub struct InMemoryClientRegistry {
    clients: Arc<RwLock<HashMap<String, Arc<dyn ClientDetails>>>>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a client record, replacing any record with the same id.
    pub async fn register(&self, details: Arc<dyn ClientDetails>) {
        let mut clients = self.clients.write().await;
        clients.insert(details.client_id().to_string(), details);
    }

    pub async fn remove(&self, client_id: &str) -> Option<Arc<dyn ClientDetails>> {
        let mut clients = self.clients.write().await;
        clients.remove(client_id)
    }
}

impl Default for InMemoryClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientDetailsService for InMemoryClientRegistry {
    async fn load_client(&self, client_id: &str) -> ClientAuthResult<Arc<dyn ClientDetails>> {
        let clients = self.clients.read().await;
        clients
            .get(client_id)
            .cloned()
            .ok_or_else(|| ClientAuthError::ClientLookup(client_id.to_string()))
    }
}
