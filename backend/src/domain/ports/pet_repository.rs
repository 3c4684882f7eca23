//! Port abstraction for pet persistence adapters.

use async_trait::async_trait;

use crate::domain::{Error, Pet, PetId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
    }
}

impl From<PetPersistenceError> for Error {
    fn from(value: PetPersistenceError) -> Self {
        match value {
            PetPersistenceError::Connection { message } => Error::service_unavailable(message),
            PetPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

/// Pet store.
///
/// Ownership is written only by the adoption commit, never through this
/// port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Insert a new pet.
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError>;

    /// Fetch a pet by identifier.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError>;

    /// List every pet in insertion order.
    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError>;

    /// Replace name, species, birth date and image; `Ok(false)` when missing.
    async fn update_details(&self, pet: &Pet) -> Result<bool, PetPersistenceError>;

    /// Delete a pet and drop it from its owner's pet list; `Ok(false)` when
    /// missing.
    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError>;
}
