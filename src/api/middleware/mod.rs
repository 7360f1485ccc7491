//! Request middleware and extractors

mod session;

pub use session::Session;
