//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::SessionTokenService;
use crate::infrastructure::member::MemberProfileService;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<MemberProfileService>,
    pub sessions: Arc<SessionTokenService>,
}

impl AppState {
    pub fn new(profiles: Arc<MemberProfileService>, sessions: Arc<SessionTokenService>) -> Self {
        Self { profiles, sessions }
    }
}
