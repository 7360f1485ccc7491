//! Domain model: entities, repository traits and core error type

pub mod comment;
pub mod game;
pub mod member;
pub mod session;
pub mod storage;

mod error;

pub use comment::{Comment, CommentCategory, CommentView};
pub use error::DomainError;
pub use game::Game;
pub use member::{Member, MemberName};
pub use session::SessionContext;
pub use storage::ObjectStore;
