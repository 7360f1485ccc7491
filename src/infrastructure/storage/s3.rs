//! S3-compatible object store client

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::storage::ObjectStore;

/// Configuration for the S3-compatible object store
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Endpoint URL of the store (also the public base URL for objects)
    pub endpoint: String,
    /// Bucket holding uploaded files
    pub bucket: String,
    /// Region; S3-compatible stores usually accept any value
    pub region: String,
    /// Access key id
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
}

/// Object store backed by an S3-compatible service
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl S3ObjectStore {
    /// Build a client from configuration. Credentials come from config, not
    /// from the ambient AWS environment.
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "member-portal-config",
        );

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), DomainError> {
        let content_length = bytes.len() as i64;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_length(content_length)
            .body(ByteStream::from(bytes));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to put object '{}': {}", key, e)))?;

        Ok(())
    }

    async fn set_public_read(&self, key: &str) -> Result<(), DomainError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to set ACL on object '{}': {}", key, e))
            })?;

        Ok(())
    }
}
