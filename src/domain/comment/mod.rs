//! Comment domain types

mod entity;
mod repository;

pub use entity::{Comment, CommentCategory, CommentView};
pub use repository::CommentRepository;
