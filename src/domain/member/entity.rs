//! Member entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{MemberValidationError, validate_member_name};

/// Member name - the unique, immutable identifier of a member.
/// Alphanumeric plus hyphens, underscores and dots, max 60 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberName(String);

impl MemberName {
    /// Create a new MemberName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, MemberValidationError> {
        let name = name.into();
        validate_member_name(&name)?;
        Ok(Self(name))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MemberName {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberName> for String {
    fn from(name: MemberName) -> Self {
        name.0
    }
}

impl std::fmt::Display for MemberName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Member entity - a registered profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique, immutable member name
    member_name: MemberName,
    /// Contact email, editable by the owner
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    /// Whether the account has been activated
    activated: bool,
    /// Single-use secret required for activation and password reset -
    /// never exposed in serialization
    #[serde(skip_serializing, default)]
    activation_code: String,
    /// Short tag line shown on the profile
    tag: String,
    /// Free-text profile description
    description: String,
    /// File name of the uploaded profile picture, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    image_file: Option<String>,
    /// Whether the member opted into the local developer database
    include_in_local_database: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new, unactivated member
    pub fn new(
        member_name: MemberName,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        activation_code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            member_name,
            email: email.into(),
            password_hash: password_hash.into(),
            activated: false,
            activation_code: activation_code.into(),
            tag: String::new(),
            description: String::new(),
            image_file: None,
            include_in_local_database: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a member from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        member_name: MemberName,
        email: String,
        password_hash: String,
        activated: bool,
        activation_code: String,
        tag: String,
        description: String,
        image_file: Option<String>,
        include_in_local_database: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_name,
            email,
            password_hash,
            activated,
            activation_code,
            tag,
            description,
            image_file,
            include_in_local_database,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn member_name(&self) -> &MemberName {
        &self.member_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn activation_code(&self) -> &str {
        &self.activation_code
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_file(&self) -> Option<&str> {
        self.image_file.as_deref()
    }

    pub fn include_in_local_database(&self) -> bool {
        self.include_in_local_database
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the email address
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Update the tag line
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
        self.touch();
    }

    /// Update the profile description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Update the profile picture file name
    pub fn set_image_file(&mut self, image_file: impl Into<String>) {
        self.image_file = Some(image_file.into());
        self.touch();
    }

    /// Update the local database opt-in flag
    pub fn set_include_in_local_database(&mut self, include: bool) {
        self.include_in_local_database = include;
        self.touch();
    }

    /// Mark the account as activated. There is no reverse transition.
    pub fn activate(&mut self) {
        self.activated = true;
        self.touch();
    }

    /// Replace the activation code with a fresh one (single-use semantics)
    pub fn rotate_activation_code(&mut self, code: impl Into<String>) {
        self.activation_code = code.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
