//! Pets available for adoption.
//!
//! A pet is adopted exactly when it has an owner. The adopted flag is derived
//! from the owner reference rather than stored beside it, so the two cannot
//! disagree inside the domain.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::{PetId, UserId};

/// Validation errors raised when building a new pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    /// A required field was missing or blank.
    MissingField(&'static str),
}

impl fmt::Display for PetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for PetValidationError {}

/// Fields required to create a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    /// Pet name.
    pub name: String,
    /// Species label, e.g. `dog`.
    pub specie: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Image path; empty when none was uploaded.
    pub image: String,
}

impl NewPet {
    /// Validate raw inputs, rejecting missing or blank values.
    ///
    /// # Examples
    /// ```
    /// use adoptme::domain::NewPet;
    /// use chrono::NaiveDate;
    ///
    /// let born = NaiveDate::from_ymd_opt(2021, 3, 4);
    /// let pet = NewPet::try_from_parts(Some("Rex".into()), Some("dog".into()), born)
    ///     .expect("complete pet");
    /// assert!(pet.image.is_empty());
    /// ```
    pub fn try_from_parts(
        name: Option<String>,
        specie: Option<String>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Self, PetValidationError> {
        let name = require_text(name, "name")?;
        let specie = require_text(specie, "specie")?;
        let birth_date = birth_date.ok_or(PetValidationError::MissingField("birthDate"))?;
        Ok(Self {
            name,
            specie,
            birth_date,
            image: String::new(),
        })
    }

    /// Attach an image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, PetValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
        _ => Err(PetValidationError::MissingField(field)),
    }
}

/// A stored pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    /// Stable identifier.
    pub id: PetId,
    /// Pet name.
    pub name: String,
    /// Species label.
    pub specie: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Image path; empty when none was uploaded.
    pub image: String,
    owner: Option<UserId>,
}

impl Pet {
    /// Build an unadopted pet.
    pub fn new(id: PetId, draft: NewPet) -> Self {
        let NewPet {
            name,
            specie,
            birth_date,
            image,
        } = draft;
        Self {
            id,
            name,
            specie,
            birth_date,
            image,
            owner: None,
        }
    }

    /// Rebuild a pet from storage, including its owner.
    pub fn restore(id: PetId, draft: NewPet, owner: Option<UserId>) -> Self {
        let mut pet = Self::new(id, draft);
        pet.owner = owner;
        pet
    }

    /// Owner of the pet, present only once adopted.
    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Whether the pet has been adopted.
    pub fn is_adopted(&self) -> bool {
        self.owner.is_some()
    }

    /// Compare-and-set the owner: succeeds only for an unadopted pet.
    ///
    /// Returns `false` and leaves the pet untouched when it already has an
    /// owner.
    pub fn try_mark_adopted(&mut self, owner: UserId) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(owner);
        true
    }

    /// Return the pet to the adoptable pool.
    pub fn release(&mut self) {
        self.owner = None;
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PetWire<'a> {
    #[serde(rename = "_id")]
    id: &'a PetId,
    name: &'a str,
    specie: &'a str,
    birth_date: &'a NaiveDate,
    adopted: bool,
    owner: Option<&'a UserId>,
    image: &'a str,
}

impl Serialize for Pet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PetWire {
            id: &self.id,
            name: &self.name,
            specie: &self.specie,
            birth_date: &self.birth_date,
            adopted: self.is_adopted(),
            owner: self.owner.as_ref(),
            image: &self.image,
        }
        .serialize(serializer)
    }
}

/// Partial update applied by `PUT /api/pets/{pid}`.
///
/// Ownership is not editable here; only the adoption workflow changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetChanges {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement species.
    pub specie: Option<String>,
    /// Replacement birth date.
    pub birth_date: Option<NaiveDate>,
    /// Replacement image path.
    pub image: Option<String>,
}

impl PetChanges {
    /// Apply every present field to `pet`.
    pub fn apply(self, pet: &mut Pet) {
        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(specie) = self.specie {
            pet.specie = specie;
        }
        if let Some(birth_date) = self.birth_date {
            pet.birth_date = birth_date;
        }
        if let Some(image) = self.image {
            pet.image = image;
        }
    }
}
