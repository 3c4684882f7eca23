//! In-memory store used when no database is configured and in tests.
//!
//! One mutex guards users, pets and adoptions together, so the adoption
//! commit sees and writes all three under a single lock. The lock is never
//! held across an `.await`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AdoptionPersistenceError, AdoptionRepository, PetPersistenceError, PetRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Adoption, AdoptionCommit, AdoptionId, Email, Pet, PetId, User, UserDocument, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    pets: Vec<Pet>,
    adoptions: Vec<Adoption>,
}

impl StoreState {
    fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == *id)
    }

    fn pet_mut(&mut self, id: &PetId) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.id == *id)
    }

    fn email_taken_by_other(&self, email: &Email, id: &UserId) -> bool {
        self.users
            .iter()
            .any(|user| user.email == *email && user.id != *id)
    }
}

/// Process-local implementation of every store port.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use adoptme::domain::ports::{AdoptionRepository, PetRepository, UserRepository};
/// use adoptme::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::new());
/// let users: Arc<dyn UserRepository> = store.clone();
/// let pets: Arc<dyn PetRepository> = store.clone();
/// let adoptions: Arc<dyn AdoptionRepository> = store;
/// # let _ = (users, pets, adoptions);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(
        &self,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<MutexGuard<'_, StoreState>, E> {
        self.state
            .lock()
            .map_err(|_| poisoned("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|user| user.email == *email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.clone())
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state.email_taken_by_other(&user.email, &user.id) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        let Some(stored) = state.user_mut(&user.id) else {
            return Ok(false);
        };
        stored.first_name.clone_from(&user.first_name);
        stored.last_name.clone_from(&user.last_name);
        stored.email = user.email.clone();
        stored.role = user.role;
        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        let before = state.users.len();
        state.users.retain(|user| user.id != *id);
        if state.users.len() == before {
            return Ok(false);
        }
        for pet in state.pets.iter_mut().filter(|pet| pet.owner() == Some(*id)) {
            pet.release();
        }
        Ok(true)
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .user_mut(id)
            .map(|user| user.last_connection = Some(at))
            .is_some())
    }

    async fn append_documents(
        &self,
        id: &UserId,
        documents: &[UserDocument],
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .user_mut(id)
            .map(|user| user.documents.extend_from_slice(documents))
            .is_some())
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let mut state = self.lock(PetPersistenceError::query)?;
        state.pets.push(pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let state = self.lock(PetPersistenceError::query)?;
        Ok(state.pets.iter().find(|pet| pet.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError> {
        let state = self.lock(PetPersistenceError::query)?;
        Ok(state.pets.clone())
    }

    async fn update_details(&self, pet: &Pet) -> Result<bool, PetPersistenceError> {
        let mut state = self.lock(PetPersistenceError::query)?;
        let Some(stored) = state.pet_mut(&pet.id) else {
            return Ok(false);
        };
        stored.name.clone_from(&pet.name);
        stored.specie.clone_from(&pet.specie);
        stored.birth_date = pet.birth_date;
        stored.image.clone_from(&pet.image);
        Ok(true)
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError> {
        let mut state = self.lock(PetPersistenceError::query)?;
        let Some(index) = state.pets.iter().position(|pet| pet.id == *id) else {
            return Ok(false);
        };
        let removed = state.pets.remove(index);
        if let Some(owner) = removed.owner().and_then(|owner| state.user_mut(&owner)) {
            owner.pets.retain(|pet| pet != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl AdoptionRepository for InMemoryStore {
    async fn record_adoption(
        &self,
        adoption: &Adoption,
    ) -> Result<AdoptionCommit, AdoptionPersistenceError> {
        let mut state = self.lock(AdoptionPersistenceError::query)?;
        if !state.users.iter().any(|user| user.id == adoption.owner) {
            return Ok(AdoptionCommit::UserMissing);
        }
        let Some(pet) = state.pet_mut(&adoption.pet) else {
            return Ok(AdoptionCommit::PetMissing);
        };
        if !pet.try_mark_adopted(adoption.owner) {
            return Ok(AdoptionCommit::AlreadyAdopted);
        }
        if let Some(owner) = state.user_mut(&adoption.owner) {
            owner.pets.push(adoption.pet);
        }
        state.adoptions.push(adoption.clone());
        Ok(AdoptionCommit::Recorded(adoption.clone()))
    }

    async fn find_by_id(
        &self,
        id: &AdoptionId,
    ) -> Result<Option<Adoption>, AdoptionPersistenceError> {
        let state = self.lock(AdoptionPersistenceError::query)?;
        Ok(state
            .adoptions
            .iter()
            .find(|adoption| adoption.id == *id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Adoption>, AdoptionPersistenceError> {
        let state = self.lock(AdoptionPersistenceError::query)?;
        Ok(state.adoptions.clone())
    }
}
