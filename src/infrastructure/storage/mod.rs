//! Object storage infrastructure

mod in_memory;
mod s3;

pub use in_memory::InMemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};
