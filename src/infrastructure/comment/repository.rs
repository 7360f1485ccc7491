//! In-memory comment repository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::comment::{Comment, CommentCategory, CommentRepository};

/// In-memory implementation of CommentRepository, used for tests and for
/// running the portal without a database
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_target(
        &self,
        target: &str,
        category: CommentCategory,
    ) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.read().await;
        let mut matching: Vec<Comment> = comments
            .iter()
            .filter(|c| c.target() == target && c.category() == category)
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.created_at());
        Ok(matching)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());
        Ok(comment)
    }
}
