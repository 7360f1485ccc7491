//! PostgreSQL game repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::game::{Game, GameRepository};
use crate::domain::member::MemberName;

/// PostgreSQL implementation of GameRepository
#[derive(Debug, Clone)]
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn for_member(
        &self,
        owner: &MemberName,
        published: bool,
    ) -> Result<Vec<Game>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT game_name, owner, title, description, published, created_at
            FROM games
            WHERE owner = $1 AND published = $2
            ORDER BY created_at
            "#,
        )
        .bind(owner.as_str())
        .bind(published)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list games: {}", e)))?;

        let mut games = Vec::with_capacity(rows.len());
        for row in &rows {
            games.push(row_to_game(row)?);
        }

        Ok(games)
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    async fn published_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError> {
        self.for_member(owner, true).await
    }

    async fn unpublished_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError> {
        self.for_member(owner, false).await
    }

    async fn create(&self, game: Game) -> Result<Game, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO games (game_name, owner, title, description, published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(game.game_name())
        .bind(game.owner().as_str())
        .bind(game.title())
        .bind(game.description())
        .bind(game.is_published())
        .bind(game.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create game: {}", e)))?;

        Ok(game)
    }
}

fn row_to_game(row: &sqlx::postgres::PgRow) -> Result<Game, DomainError> {
    let owner: String = row.get("owner");

    let owner = MemberName::new(&owner)
        .map_err(|e| DomainError::database(format!("Invalid game owner in database: {}", e)))?;

    Ok(Game::from_parts(
        row.get("game_name"),
        owner,
        row.get("title"),
        row.get("description"),
        row.get("published"),
        row.get("created_at"),
    ))
}
