//! Session token validation
//!
//! The login flow lives in a separate authentication service; this portal
//! only needs to read the member name out of the bearer token it issues.
//! Tokens are HS256-signed with a shared secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::member::MemberName;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated member name
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(member: &MemberName, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: member.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn member_name(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the session token service
#[derive(Debug, Clone)]
pub struct SessionTokenConfig {
    /// Shared HS256 secret, matching the authentication service
    pub secret: String,
    /// Token expiration in hours
    pub expiration_hours: u64,
}

impl Default for SessionTokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
        }
    }
}

/// Validates (and, for tests and tooling, issues) session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    config: SessionTokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl SessionTokenService {
    pub fn new(config: SessionTokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a member
    pub fn generate(&self, member: &MemberName) -> Result<String, DomainError> {
        let claims = SessionClaims::new(member, self.config.expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate session token: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::unauthorized(format!("Invalid session token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionTokenService {
        SessionTokenService::new(SessionTokenConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
        })
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service();
        let member = MemberName::new("kevin").unwrap();

        let token = service.generate(&member).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.member_name(), "kevin");
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let service = service();
        assert!(service.validate("not-a-token").is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let member = MemberName::new("kevin").unwrap();
        let token = service().generate(&member).unwrap();

        let other = SessionTokenService::new(SessionTokenConfig {
            secret: "different-secret".to_string(),
            expiration_hours: 1,
        });

        assert!(other.validate(&token).is_err());
    }
}
