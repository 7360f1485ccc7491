//! Comment repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Comment, CommentCategory};
use crate::domain::DomainError;

/// Repository trait for comment storage. Profile pages only read comments;
/// posting them is handled by another component.
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    /// List comments attached to a target entity within a category,
    /// oldest first
    async fn list_for_target(
        &self,
        target: &str,
        category: CommentCategory,
    ) -> Result<Vec<Comment>, DomainError>;

    /// Create a comment (used by seeding and tests)
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError>;
}
