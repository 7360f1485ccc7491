//! Request-scoped session context
//!
//! The authentication subsystem lives outside this service; each request
//! carries an explicit context naming the authenticated member, if any.
//! Handlers consult the context for ownership checks and never mutate it.

use crate::domain::member::MemberName;

/// The authenticated member for the current request, if any
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    member: Option<MemberName>,
}

impl SessionContext {
    /// Context for an unauthenticated request
    pub fn anonymous() -> Self {
        Self { member: None }
    }

    /// Context for a request authenticated as the given member
    pub fn authenticated(member: MemberName) -> Self {
        Self {
            member: Some(member),
        }
    }

    /// The authenticated member, if any
    pub fn member(&self) -> Option<&MemberName> {
        self.member.as_ref()
    }

    /// Ownership check: is this request authenticated as `name`?
    pub fn is_member(&self, name: &MemberName) -> bool {
        self.member.as_ref() == Some(name)
    }
}
