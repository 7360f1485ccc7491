//! Member domain types

mod entity;
mod repository;
mod validation;

pub use entity::{Member, MemberName};
pub use repository::MemberRepository;
pub use validation::{MAX_MEMBER_NAME_LENGTH, MemberValidationError, validate_member_name};
