//! Driving port for pet mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewPet, Pet, PetChanges, PetId, UploadedFile};

/// Write-side port for pets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetsCommand: Send + Sync {
    /// Create an unadopted pet, storing `image` first when supplied.
    async fn create_pet(&self, draft: NewPet, image: Option<UploadedFile>) -> Result<Pet, Error>;

    /// Apply a partial update to name, species, birth date or image.
    async fn update_pet(&self, id: &PetId, changes: PetChanges) -> Result<(), Error>;

    /// Remove a pet.
    async fn delete_pet(&self, id: &PetId) -> Result<(), Error>;
}
