//! In-memory game repository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::game::{Game, GameRepository};
use crate::domain::member::MemberName;

/// In-memory implementation of GameRepository, used for tests and for
/// running the portal without a database
#[derive(Debug, Default, Clone)]
pub struct InMemoryGameRepository {
    games: Arc<RwLock<Vec<Game>>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn for_member(&self, owner: &MemberName, published: bool) -> Vec<Game> {
        let games = self.games.read().await;
        games
            .iter()
            .filter(|g| g.owner() == owner && g.is_published() == published)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn published_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError> {
        Ok(self.for_member(owner, true).await)
    }

    async fn unpublished_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError> {
        Ok(self.for_member(owner, false).await)
    }

    async fn create(&self, game: Game) -> Result<Game, DomainError> {
        let mut games = self.games.write().await;
        games.push(game.clone());
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_published_partition() {
        let repo = InMemoryGameRepository::new();
        let owner = MemberName::new("kevin").unwrap();

        repo.create(Game::new("pong", owner.clone(), "Pong", true))
            .await
            .unwrap();
        repo.create(Game::new("wip", owner.clone(), "Work in progress", false))
            .await
            .unwrap();

        let published = repo.published_for_member(&owner).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].game_name(), "pong");

        let unpublished = repo.unpublished_for_member(&owner).await.unwrap();
        assert_eq!(unpublished.len(), 1);
        assert_eq!(unpublished[0].game_name(), "wip");
    }

    #[tokio::test]
    async fn test_other_members_games_excluded() {
        let repo = InMemoryGameRepository::new();
        let kevin = MemberName::new("kevin").unwrap();
        let ada = MemberName::new("ada").unwrap();

        repo.create(Game::new("pong", kevin.clone(), "Pong", true))
            .await
            .unwrap();

        let published = repo.published_for_member(&ada).await.unwrap();
        assert!(published.is_empty());
    }
}
