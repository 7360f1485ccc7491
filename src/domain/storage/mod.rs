//! Object storage abstraction
//!
//! Profile pictures are stored in an external object store. The service only
//! needs two capabilities: uploading a blob under a key, and making that key
//! publicly readable. The concrete client is injected at startup from
//! configuration.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Capability set the profile service requires from object storage
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Upload a blob under the given key
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Make the object under the given key publicly readable
    async fn set_public_read(&self, key: &str) -> Result<(), DomainError>;
}
