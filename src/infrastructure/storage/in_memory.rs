//! In-memory object store

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::storage::ObjectStore;

/// In-memory implementation of ObjectStore, used for tests and for running
/// the portal without an object store. Records puts and public-read marks,
/// and can be told to fail for exercising the partial-failure edit path.
#[derive(Debug, Default, Clone)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
    public_keys: Arc<RwLock<HashSet<String>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent operations fail with a storage error
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    /// Get a stored object's bytes
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.read().await.get(key).cloned()
    }

    /// Whether a key has been marked public-read
    pub async fn is_public(&self, key: &str) -> bool {
        self.public_keys.read().await.contains(key)
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    async fn check_should_fail(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::storage("Object store configured to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        _content_type: Option<&str>,
    ) -> Result<(), DomainError> {
        self.check_should_fail().await?;
        self.objects.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn set_public_read(&self, key: &str) -> Result<(), DomainError> {
        self.check_should_fail().await?;

        if !self.objects.read().await.contains_key(key) {
            return Err(DomainError::storage(format!(
                "Cannot set ACL on missing object '{}'",
                key
            )));
        }

        self.public_keys.write().await.insert(key.to_string());
        Ok(())
    }
}
