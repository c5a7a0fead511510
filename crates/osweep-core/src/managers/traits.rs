//! The uniform resource-manager contract.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::managers::errors::ManagerError;
use crate::models::{Resource, ResourceKind};

/// One manager per resource kind, adapting that kind's backend client to
/// a uniform list/get/delete surface.
///
/// `get_all` returns a set keyed by identifier, so one fetch is one
/// consistent snapshot with no duplicates. `delete` has idempotent
/// intent: a backend "not found" during delete counts as done.
#[async_trait]
pub trait ResourceManager: Send + Sync {
    type Item: Resource;

    fn kind(&self) -> ResourceKind;

    async fn get_by_id(&self, id: &str) -> Result<Self::Item, ManagerError>;

    async fn get_all(&self) -> Result<HashSet<Self::Item>, ManagerError>;

    async fn delete(&self, id: &str) -> Result<(), ManagerError>;
}
