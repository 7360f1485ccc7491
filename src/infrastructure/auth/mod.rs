//! Session token infrastructure

mod session_token;

pub use session_token::{SessionClaims, SessionTokenConfig, SessionTokenService};
