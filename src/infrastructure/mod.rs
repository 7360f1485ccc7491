//! Infrastructure: repository implementations, object storage clients,
//! password hashing, session tokens and logging

pub mod auth;
pub mod comment;
pub mod game;
pub mod logging;
pub mod member;
pub mod storage;
