//! Adoption workflow service.
//!
//! Checks run in a fixed order (user, then pet, then adoption state) and
//! only a request that clears all three reaches the store. The store
//! applies the pet update, the owner's pet list and the adoption record
//! as one commit, so this service never writes anything on a failure path.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AdoptionCommand, AdoptionQuery, AdoptionRepository, PetRepository, UserRepository,
};
use crate::domain::{Adoption, AdoptionCommit, AdoptionError, AdoptionId, Error, PetId, UserId};

/// Implements [`AdoptionCommand`] and [`AdoptionQuery`] over the three stores.
#[derive(Clone)]
pub struct AdoptionService {
    users: Arc<dyn UserRepository>,
    pets: Arc<dyn PetRepository>,
    adoptions: Arc<dyn AdoptionRepository>,
}

impl AdoptionService {
    /// Create a service over the given stores.
    pub fn new(
        users: Arc<dyn UserRepository>,
        pets: Arc<dyn PetRepository>,
        adoptions: Arc<dyn AdoptionRepository>,
    ) -> Self {
        Self {
            users,
            pets,
            adoptions,
        }
    }

    fn resolve_commit(commit: AdoptionCommit) -> Result<Adoption, Error> {
        match commit {
            AdoptionCommit::Recorded(adoption) => Ok(adoption),
            AdoptionCommit::AlreadyAdopted => Err(AdoptionError::AlreadyAdopted.into()),
            AdoptionCommit::UserMissing => Err(AdoptionError::UserNotFound.into()),
            AdoptionCommit::PetMissing => Err(AdoptionError::PetNotFound.into()),
        }
    }
}

#[async_trait]
impl AdoptionCommand for AdoptionService {
    async fn adopt_pet(&self, user: &UserId, pet: &PetId) -> Result<Adoption, Error> {
        if self.users.find_by_id(user).await?.is_none() {
            return Err(AdoptionError::UserNotFound.into());
        }

        let candidate = self
            .pets
            .find_by_id(pet)
            .await?
            .ok_or(AdoptionError::PetNotFound)?;
        if candidate.is_adopted() {
            debug!(pet_id = %pet, "adoption refused: pet already has an owner");
            return Err(AdoptionError::AlreadyAdopted.into());
        }

        let commit = self
            .adoptions
            .record_adoption(&Adoption::new(*user, *pet))
            .await?;
        let adoption = Self::resolve_commit(commit)?;
        info!(
            adoption_id = %adoption.id,
            user_id = %user,
            pet_id = %pet,
            "pet adopted"
        );
        Ok(adoption)
    }
}

#[async_trait]
impl AdoptionQuery for AdoptionService {
    async fn list_adoptions(&self) -> Result<Vec<Adoption>, Error> {
        Ok(self.adoptions.list().await?)
    }

    async fn get_adoption(&self, id: &AdoptionId) -> Result<Adoption, Error> {
        self.adoptions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Adoption not found"))
    }
}
