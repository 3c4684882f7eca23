//! Driving port for reading pets.

use async_trait::async_trait;

use crate::domain::{Error, Pet, PetId};

/// Read-side port for pets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetsQuery: Send + Sync {
    /// Every pet.
    async fn list_pets(&self) -> Result<Vec<Pet>, Error>;

    /// A single pet, or `Pet not found` (404).
    async fn get_pet(&self, id: &PetId) -> Result<Pet, Error>;
}
