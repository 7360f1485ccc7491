//! Member repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Member, MemberName};
use crate::domain::DomainError;

/// Repository trait for member storage.
///
/// Members are created by the registration flow (outside this service) and
/// are never deleted here; this component reads, lists and updates them.
#[async_trait]
pub trait MemberRepository: Send + Sync + Debug {
    /// Get a member by name
    async fn get(&self, name: &MemberName) -> Result<Option<Member>, DomainError>;

    /// List all members, unfiltered
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    /// Create a new member (used by seeding and tests; registration itself
    /// lives in another service)
    async fn create(&self, member: Member) -> Result<Member, DomainError>;

    /// Update an existing member. Last writer wins; there is no
    /// optimistic concurrency token on member rows.
    async fn update(&self, member: &Member) -> Result<Member, DomainError>;

    /// Check if a member exists
    async fn exists(&self, name: &MemberName) -> Result<bool, DomainError> {
        Ok(self.get(name).await?.is_some())
    }
}
