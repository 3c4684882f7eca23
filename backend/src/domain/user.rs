//! User accounts.
//!
//! A [`User`] is created by registration or mock generation and mutated by
//! ordinary CRUD. Email uniqueness is enforced by the user store, not here.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PetId, UserId};

/// Validation errors for user field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Role label is not `user` or `admin`.
    UnknownRole(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::UnknownRole(role) => write!(f, "unknown role: {role}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Email address, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account; the default for registrations.
    #[default]
    User,
    /// Administrative account.
    Admin,
}

impl Role {
    /// Lowercase label stored and serialised for the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(UserValidationError::UnknownRole(s.to_owned())),
        }
    }
}

/// Encoded password hash in PHC string format.
///
/// Never holds plaintext. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-encoded hash.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Reference to an uploaded file attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    /// Original file name supplied by the client.
    pub name: String,
    /// Storage path of the uploaded file.
    pub reference: String,
}

/// Registered user.
///
/// Serialised with the `_id` key and snake-case field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: Email,
    /// Hashed password.
    pub password: PasswordHash,
    /// Account role.
    pub role: Role,
    /// Pets adopted by this user.
    pub pets: Vec<PetId>,
    /// Uploaded documents.
    pub documents: Vec<UserDocument>,
    /// Time of the most recent successful login.
    pub last_connection: Option<DateTime<Utc>>,
}

impl User {
    /// Build a fresh user with no pets, documents or logins.
    pub fn new(id: UserId, profile: UserProfile, password: PasswordHash) -> Self {
        let UserProfile {
            first_name,
            last_name,
            email,
            role,
        } = profile;
        Self {
            id,
            first_name,
            last_name,
            email,
            password,
            role,
            pets: Vec::new(),
            documents: Vec::new(),
            last_connection: None,
        }
    }

    /// Full display name used by the session summary.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Identity fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: Email,
    /// Account role.
    pub role: Role,
}

/// Partial update applied by `PUT /api/users/{uid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement email; must stay unique.
    pub email: Option<Email>,
    /// Replacement role.
    pub role: Option<Role>,
}

impl UserChanges {
    /// Apply every present field to `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}
