//! Game repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Game;
use crate::domain::DomainError;
use crate::domain::member::MemberName;

/// Repository trait for game storage. The profile service only ever reads
/// the published/unpublished partitions of a member's games.
#[async_trait]
pub trait GameRepository: Send + Sync + Debug {
    /// List the published games of a member
    async fn published_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError>;

    /// List the unpublished games of a member
    async fn unpublished_for_member(&self, owner: &MemberName) -> Result<Vec<Game>, DomainError>;

    /// Create a game (used by seeding and tests)
    async fn create(&self, game: Game) -> Result<Game, DomainError>;
}
