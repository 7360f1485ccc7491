//! Member name validation

use thiserror::Error;

/// Maximum length of a member name
pub const MAX_MEMBER_NAME_LENGTH: usize = 60;

/// Errors that can occur when validating a member name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    Empty,

    #[error("Member name cannot exceed {MAX_MEMBER_NAME_LENGTH} characters")]
    TooLong,

    #[error("Member name can only contain alphanumeric characters, hyphens, underscores and dots")]
    InvalidCharacters,
}

/// Validate a member name
pub fn validate_member_name(name: &str) -> Result<(), MemberValidationError> {
    if name.is_empty() {
        return Err(MemberValidationError::Empty);
    }

    if name.len() > MAX_MEMBER_NAME_LENGTH {
        return Err(MemberValidationError::TooLong);
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(MemberValidationError::InvalidCharacters);
    }

    Ok(())
}
