//! Comment entity and view types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::member::Member;

/// Category tag partitioning comments by the kind of entity they target.
/// Profile pages only ever load account-level comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentCategory {
    /// Comment left on a member's profile page
    Account,
    /// Comment left on a game page
    Game,
    /// Comment left on a news post
    News,
}

impl CommentCategory {
    /// Stored tag value for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "AccountComment",
            Self::Game => "GameComment",
            Self::News => "NewsComment",
        }
    }

    /// Parse a stored tag value
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "AccountComment" => Some(Self::Account),
            "GameComment" => Some(Self::Game),
            "NewsComment" => Some(Self::News),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comment attached to some target entity. Read-only from the profile
/// service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Member that wrote the comment
    commenting_member: String,
    /// Identifier of the entity the comment is attached to
    target: String,
    /// Which kind of entity the target is
    category: CommentCategory,
    /// Comment body
    body: String,
    /// When the comment was posted
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        commenting_member: impl Into<String>,
        target: impl Into<String>,
        category: CommentCategory,
        body: impl Into<String>,
    ) -> Self {
        Self {
            commenting_member: commenting_member.into(),
            target: target.into(),
            category,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a comment from stored fields
    pub fn from_parts(
        commenting_member: String,
        target: String,
        category: CommentCategory,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            commenting_member,
            target,
            category,
            body,
            created_at,
        }
    }

    pub fn commenting_member(&self) -> &str {
        &self.commenting_member
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn category(&self) -> CommentCategory {
        self.category
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A comment joined with its resolved author, ready for presentation
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    /// Resolved author record; None if the author no longer resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Member>,
    /// Public URL of the author's profile picture, if they have one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_picture: Option<String>,
}

impl CommentView {
    /// Build a view by joining a raw comment with its resolved author.
    /// The picture URL follows the `{base}/users/{member}/{file}` convention.
    pub fn new(comment: Comment, author: Option<Member>, public_base_url: &str) -> Self {
        let author_picture = author.as_ref().and_then(|member| {
            member.image_file().map(|file| {
                format!(
                    "{}/users/{}/{}",
                    public_base_url,
                    member.member_name(),
                    file
                )
            })
        });

        Self {
            comment,
            author,
            author_picture,
        }
    }
}
