//! Session context extractor
//!
//! Reads the bearer token issued by the authentication service and turns it
//! into a request-scoped SessionContext. This extractor never rejects: a
//! missing or invalid token simply yields an anonymous context, and the
//! ownership checks downstream decide what that means per handler.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use std::convert::Infallible;
use tracing::debug;

use crate::api::state::AppState;
use crate::domain::member::MemberName;
use crate::domain::session::SessionContext;

/// Extractor wrapping the request's session context
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session(session_from_headers(&parts.headers, state)))
    }
}

fn session_from_headers(headers: &HeaderMap, state: &AppState) -> SessionContext {
    let Some(token) = extract_bearer_token(headers) else {
        return SessionContext::anonymous();
    };

    let claims = match state.sessions.validate(&token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            return SessionContext::anonymous();
        }
    };

    match MemberName::new(claims.member_name()) {
        Ok(member) => SessionContext::authenticated(member),
        Err(e) => {
            debug!(error = %e, "Session token carried an invalid member name");
            SessionContext::anonymous()
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(token.trim().to_string())
}
