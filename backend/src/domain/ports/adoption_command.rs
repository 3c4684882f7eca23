//! Driving port for the adoption workflow.

use async_trait::async_trait;

use crate::domain::{Adoption, Error, PetId, UserId};

/// Use-case port for adopting a pet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionCommand: Send + Sync {
    /// Make `pet` adopted by `user`.
    ///
    /// Fails with `user Not found` (404), `Pet not found` (404) or
    /// `Pet is already adopted` (400), checked in that order.
    async fn adopt_pet(&self, user: &UserId, pet: &PetId) -> Result<Adoption, Error>;
}
