//! In-memory backend client set.
//!
//! Implements all three ports over a mutex-guarded fleet. Backs the
//! `fixture` backend for policy rehearsal against a fleet file, and the
//! unit tests, which script failures through the fault queue.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::ClientError;
use crate::clients::traits::{CatalogClient, ComputeClient, ImageClient};
use crate::clients::types::{Endpoint, RawImage, RawKeypair, RawServer};

#[derive(Default)]
struct FleetState {
    servers: HashMap<String, RawServer>,
    images: HashMap<String, RawImage>,
    keypairs: HashMap<String, RawKeypair>,

    // Scripted behavior, keyed by identifier
    delete_faults: HashMap<String, VecDeque<ClientError>>,
    delete_delay: Option<Duration>,
    endpoint_fault: Option<ClientError>,

    // Call accounting
    delete_attempts: HashMap<String, u32>,
    reset_calls: HashMap<String, u32>,
    endpoint_resolutions: u32,
    server_list_calls: u32,
}

impl FleetState {
    fn pop_delete_fault(&mut self, id: &str) -> Option<ClientError> {
        let queue = self.delete_faults.get_mut(id)?;
        queue.pop_front()
    }
}

#[derive(Default)]
pub struct MemoryCloud {
    state: Mutex<FleetState>,
}

impl MemoryCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fleet(
        servers: Vec<RawServer>,
        images: Vec<RawImage>,
        keypairs: Vec<RawKeypair>,
    ) -> Self {
        let cloud = Self::new();
        {
            let mut state = cloud.state.lock().unwrap();
            state.servers = servers.into_iter().map(|s| (s.id.clone(), s)).collect();
            state.images = images.into_iter().map(|i| (i.id.clone(), i)).collect();
            state.keypairs = keypairs.into_iter().map(|k| (k.name.clone(), k)).collect();
        }
        cloud
    }

    /// Queue an error for the next delete call against `id`. Faults pop
    /// in FIFO order; once the queue is empty, deletes succeed again.
    pub fn push_delete_fault(&self, id: &str, error: ClientError) {
        let mut state = self.state.lock().unwrap();
        state
            .delete_faults
            .entry(id.to_string())
            .or_default()
            .push_back(error);
    }

    /// Delay every delete call, for exercising caller-side timeouts.
    pub fn set_delete_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delete_delay = Some(delay);
    }

    /// Make the next catalog lookup fail.
    pub fn fail_endpoint_resolution(&self, error: ClientError) {
        self.state.lock().unwrap().endpoint_fault = Some(error);
    }

    pub fn delete_attempts(&self, id: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .delete_attempts
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    pub fn reset_calls(&self, id: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .reset_calls
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    pub fn endpoint_resolutions(&self) -> u32 {
        self.state.lock().unwrap().endpoint_resolutions
    }

    pub fn server_list_calls(&self) -> u32 {
        self.state.lock().unwrap().server_list_calls
    }

    pub fn contains_server(&self, id: &str) -> bool {
        self.state.lock().unwrap().servers.contains_key(id)
    }

    pub fn contains_image(&self, id: &str) -> bool {
        self.state.lock().unwrap().images.contains_key(id)
    }

    pub fn contains_keypair(&self, name: &str) -> bool {
        self.state.lock().unwrap().keypairs.contains_key(name)
    }

    async fn pause_if_configured(&self) {
        let delay = self.state.lock().unwrap().delete_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ComputeClient for MemoryCloud {
    async fn list_servers(&self) -> Result<Vec<RawServer>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.server_list_calls += 1;
        Ok(state.servers.values().cloned().collect())
    }

    async fn get_server(&self, id: &str) -> Result<RawServer, ClientError> {
        self.state
            .lock()
            .unwrap()
            .servers
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                identifier: id.to_string(),
            })
    }

    async fn force_delete_server(&self, id: &str) -> Result<(), ClientError> {
        self.pause_if_configured().await;
        let mut state = self.state.lock().unwrap();
        *state.delete_attempts.entry(id.to_string()).or_insert(0) += 1;
        if let Some(fault) = state.pop_delete_fault(id) {
            return Err(fault);
        }
        if state.servers.remove(id).is_none() {
            return Err(ClientError::NotFound {
                identifier: id.to_string(),
            });
        }
        Ok(())
    }

    async fn reset_server_state(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if !state.servers.contains_key(id) {
            return Err(ClientError::NotFound {
                identifier: id.to_string(),
            });
        }
        *state.reset_calls.entry(id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn list_keypairs(&self) -> Result<Vec<RawKeypair>, ClientError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .keypairs
            .values()
            .cloned()
            .collect())
    }

    async fn get_keypair(&self, name: &str) -> Result<RawKeypair, ClientError> {
        self.state
            .lock()
            .unwrap()
            .keypairs
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                identifier: name.to_string(),
            })
    }

    async fn delete_keypair(&self, name: &str) -> Result<(), ClientError> {
        self.pause_if_configured().await;
        let mut state = self.state.lock().unwrap();
        *state.delete_attempts.entry(name.to_string()).or_insert(0) += 1;
        if let Some(fault) = state.pop_delete_fault(name) {
            return Err(fault);
        }
        if state.keypairs.remove(name).is_none() {
            return Err(ClientError::NotFound {
                identifier: name.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogClient for MemoryCloud {
    async fn resolve_endpoint(&self, service_type: &str) -> Result<Endpoint, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.endpoint_resolutions += 1;
        if let Some(fault) = state.endpoint_fault.take() {
            return Err(fault);
        }
        Ok(Endpoint(format!("memory://{service_type}")))
    }
}

#[async_trait]
impl ImageClient for MemoryCloud {
    async fn list_images(&self, _endpoint: &Endpoint) -> Result<Vec<RawImage>, ClientError> {
        Ok(self.state.lock().unwrap().images.values().cloned().collect())
    }

    async fn get_image(&self, _endpoint: &Endpoint, id: &str) -> Result<RawImage, ClientError> {
        self.state
            .lock()
            .unwrap()
            .images
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                identifier: id.to_string(),
            })
    }

    async fn delete_image(&self, _endpoint: &Endpoint, id: &str) -> Result<(), ClientError> {
        self.pause_if_configured().await;
        let mut state = self.state.lock().unwrap();
        *state.delete_attempts.entry(id.to_string()).or_insert(0) += 1;
        if let Some(fault) = state.pop_delete_fault(id) {
            return Err(fault);
        }
        if state.images.remove(id).is_none() {
            return Err(ClientError::NotFound {
                identifier: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, name: &str) -> RawServer {
        RawServer {
            id: id.to_string(),
            name: name.to_string(),
            created: "2026-01-10T08:00:00Z".to_string(),
            updated: "2026-01-11T08:00:00Z".to_string(),
            image: None,
            key_name: None,
        }
    }

    #[tokio::test]
    async fn test_list_and_delete_server() {
        let cloud = MemoryCloud::with_fleet(vec![server("srv-1", "builder")], vec![], vec![]);

        assert_eq!(cloud.list_servers().await.unwrap().len(), 1);
        cloud.force_delete_server("srv-1").await.unwrap();
        assert!(!cloud.contains_server("srv-1"));
        assert_eq!(cloud.delete_attempts("srv-1"), 1);
    }

    #[tokio::test]
    async fn test_get_server_not_found() {
        let cloud = MemoryCloud::new();
        let error = cloud.get_server("srv-1").await.unwrap_err();
        assert!(matches!(error, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_faults_pop_in_order() {
        let cloud = MemoryCloud::with_fleet(vec![server("srv-1", "builder")], vec![], vec![]);
        cloud.push_delete_fault(
            "srv-1",
            ClientError::InvalidState {
                message: "task_state is deleting".to_string(),
            },
        );

        let first = cloud.force_delete_server("srv-1").await.unwrap_err();
        assert!(matches!(first, ClientError::InvalidState { .. }));

        // Queue drained: the next attempt goes through
        cloud.force_delete_server("srv-1").await.unwrap();
        assert_eq!(cloud.delete_attempts("srv-1"), 2);
    }

    #[tokio::test]
    async fn test_endpoint_resolution_counts_and_faults() {
        let cloud = MemoryCloud::new();
        let endpoint = cloud.resolve_endpoint("image").await.unwrap();
        assert_eq!(endpoint.to_string(), "memory://image");
        assert_eq!(cloud.endpoint_resolutions(), 1);

        cloud.fail_endpoint_resolution(ClientError::Unauthorized {
            message: "token expired".to_string(),
        });
        assert!(cloud.resolve_endpoint("image").await.is_err());
        assert_eq!(cloud.endpoint_resolutions(), 2);

        // Fault is one-shot
        assert!(cloud.resolve_endpoint("image").await.is_ok());
    }
}
