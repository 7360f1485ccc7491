//! Game domain types

mod entity;
mod repository;

pub use entity::Game;
pub use repository::GameRepository;
