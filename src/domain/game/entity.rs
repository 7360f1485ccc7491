//! Game entity
//!
//! Games are owned by members and are read-only from the profile service's
//! perspective; creation and publishing are handled elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::member::MemberName;

/// A game owned by a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique game name (URL segment)
    game_name: String,
    /// Member that owns the game
    owner: MemberName,
    /// Display title
    title: String,
    /// Short description shown in listings
    description: String,
    /// Whether the game is visible to other members
    published: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(
        game_name: impl Into<String>,
        owner: MemberName,
        title: impl Into<String>,
        published: bool,
    ) -> Self {
        Self {
            game_name: game_name.into(),
            owner,
            title: title.into(),
            description: String::new(),
            published,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a game from stored fields
    pub fn from_parts(
        game_name: String,
        owner: MemberName,
        title: String,
        description: String,
        published: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            game_name,
            owner,
            title,
            description,
            published,
            created_at,
        }
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn owner(&self) -> &MemberName {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
