//! PostgreSQL comment repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::comment::{Comment, CommentCategory, CommentRepository};

/// PostgreSQL implementation of CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_target(
        &self,
        target: &str,
        category: CommentCategory,
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT commenting_member, target, category, body, created_at
            FROM comments
            WHERE target = $1 AND category = $2
            ORDER BY created_at
            "#,
        )
        .bind(target)
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list comments: {}", e)))?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            comments.push(row_to_comment(row)?);
        }

        Ok(comments)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (commenting_member, target, category, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.commenting_member())
        .bind(comment.target())
        .bind(comment.category().as_str())
        .bind(comment.body())
        .bind(comment.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create comment: {}", e)))?;

        Ok(comment)
    }
}

fn row_to_comment(row: &sqlx::postgres::PgRow) -> Result<Comment, DomainError> {
    let category: String = row.get("category");

    let category = CommentCategory::parse(&category).ok_or_else(|| {
        DomainError::database(format!("Invalid comment category in database: {}", category))
    })?;

    Ok(Comment::from_parts(
        row.get("commenting_member"),
        row.get("target"),
        category,
        row.get("body"),
        row.get("created_at"),
    ))
}
