//! Game infrastructure

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresGameRepository;
pub use repository::InMemoryGameRepository;
