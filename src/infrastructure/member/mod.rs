//! Member infrastructure
//!
//! Password hashing with Argon2, random key generation, repositories, and
//! the profile service itself.

mod keys;
mod password;
mod postgres_repository;
mod repository;
mod service;

pub use keys::{ACTIVATION_CODE_LENGTH, GENERATED_PASSWORD_LENGTH, random_key};
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresMemberRepository;
pub use repository::InMemoryMemberRepository;
pub use service::{
    ActivationOutcome, EditSubmission, MemberProfileService, OwnedFormOutcome,
    PasswordChangeOutcome, PasswordResetOutcome, PictureUpload, ProfileEditRequest, ProfileOutcome,
    ProfilePage,
};
