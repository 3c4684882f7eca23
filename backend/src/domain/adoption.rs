//! Adoption records and workflow outcomes.

use std::fmt;

use serde::Serialize;

use super::{AdoptionId, Error, PetId, UserId};

/// Immutable record linking an owner to an adopted pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adoption {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: AdoptionId,
    /// Adopting user.
    pub owner: UserId,
    /// Adopted pet.
    pub pet: PetId,
}

impl Adoption {
    /// Build a record with a fresh identifier.
    pub fn new(owner: UserId, pet: PetId) -> Self {
        Self {
            id: AdoptionId::random(),
            owner,
            pet,
        }
    }
}

/// Result of the atomic adoption commit performed by the store.
///
/// The store writes the pet, the owner's pet list and the adoption record
/// together, or none of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdoptionCommit {
    /// All three writes were applied.
    Recorded(Adoption),
    /// The pet already had an owner when the commit ran.
    AlreadyAdopted,
    /// The user disappeared between lookup and commit.
    UserMissing,
    /// The pet disappeared between lookup and commit.
    PetMissing,
}

/// Reasons an adoption is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionError {
    /// The user does not exist.
    UserNotFound,
    /// The pet does not exist.
    PetNotFound,
    /// The pet already has an owner.
    AlreadyAdopted,
}

impl fmt::Display for AdoptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserNotFound => f.write_str("user Not found"),
            Self::PetNotFound => f.write_str("Pet not found"),
            Self::AlreadyAdopted => f.write_str("Pet is already adopted"),
        }
    }
}

impl std::error::Error for AdoptionError {}

impl From<AdoptionError> for Error {
    fn from(value: AdoptionError) -> Self {
        match value {
            AdoptionError::UserNotFound | AdoptionError::PetNotFound => {
                Error::not_found(value.to_string())
            }
            AdoptionError::AlreadyAdopted => Error::invalid_request(value.to_string()),
        }
    }
}
