//! Pet catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DocumentStorage, PetRepository, PetsCommand, PetsQuery};
use crate::domain::{Error, NewPet, Pet, PetChanges, PetId, UploadedFile};

fn pet_not_found() -> Error {
    Error::not_found("Pet not found")
}

/// Implements [`PetsQuery`] and [`PetsCommand`].
#[derive(Clone)]
pub struct PetsService {
    pets: Arc<dyn PetRepository>,
    storage: Arc<dyn DocumentStorage>,
}

impl PetsService {
    /// Create a service over the pet store and image storage.
    pub fn new(pets: Arc<dyn PetRepository>, storage: Arc<dyn DocumentStorage>) -> Self {
        Self { pets, storage }
    }
}

#[async_trait]
impl PetsQuery for PetsService {
    async fn list_pets(&self) -> Result<Vec<Pet>, Error> {
        Ok(self.pets.list().await?)
    }

    async fn get_pet(&self, id: &PetId) -> Result<Pet, Error> {
        self.pets.find_by_id(id).await?.ok_or_else(pet_not_found)
    }
}

#[async_trait]
impl PetsCommand for PetsService {
    async fn create_pet(&self, draft: NewPet, image: Option<UploadedFile>) -> Result<Pet, Error> {
        let draft = match image {
            Some(file) => draft.with_image(self.storage.store(&file).await?),
            None => draft,
        };
        let pet = Pet::new(PetId::random(), draft);
        self.pets.create(&pet).await?;
        info!(pet_id = %pet.id, specie = %pet.specie, "pet created");
        Ok(pet)
    }

    async fn update_pet(&self, id: &PetId, changes: PetChanges) -> Result<(), Error> {
        let mut pet = self.get_pet(id).await?;
        changes.apply(&mut pet);
        if !self.pets.update_details(&pet).await? {
            return Err(pet_not_found());
        }
        info!(pet_id = %id, "pet updated");
        Ok(())
    }

    async fn delete_pet(&self, id: &PetId) -> Result<(), Error> {
        if !self.pets.delete(id).await? {
            return Err(pet_not_found());
        }
        info!(pet_id = %id, "pet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockDocumentStorage, MockPetRepository};

    fn draft() -> NewPet {
        NewPet {
            name: "Milo".into(),
            specie: "cat".into(),
            birth_date: NaiveDate::from_ymd_opt(2021, 6, 1).expect("valid date"),
            image: String::new(),
        }
    }

    fn service(pets: MockPetRepository, storage: MockDocumentStorage) -> PetsService {
        PetsService::new(Arc::new(pets), Arc::new(storage))
    }

    #[tokio::test]
    async fn created_pet_starts_unadopted() {
        let mut pets = MockPetRepository::new();
        pets.expect_create()
            .withf(|pet| !pet.is_adopted() && pet.image.is_empty())
            .return_once(|_| Ok(()));
        let mut storage = MockDocumentStorage::new();
        storage.expect_store().never();

        let pet = service(pets, storage)
            .create_pet(draft(), None)
            .await
            .expect("pet created");

        assert_eq!(pet.name, "Milo");
        assert!(pet.owner().is_none());
    }

    #[tokio::test]
    async fn image_is_stored_before_pet_is_created() {
        let mut pets = MockPetRepository::new();
        pets.expect_create()
            .withf(|pet| pet.image == "public/pets/42-milo.png")
            .return_once(|_| Ok(()));
        let mut storage = MockDocumentStorage::new();
        storage
            .expect_store()
            .times(1)
            .return_once(|_| Ok("public/pets/42-milo.png".to_owned()));

        let image = UploadedFile {
            field: "image".into(),
            file_name: "milo.png".into(),
            bytes: vec![0x89, 0x50],
        };
        let pet = service(pets, storage)
            .create_pet(draft(), Some(image))
            .await
            .expect("pet created");

        assert_eq!(pet.image, "public/pets/42-milo.png");
    }

    #[tokio::test]
    async fn update_keeps_adoption_state() {
        let id = PetId::random();
        let owner = crate::domain::UserId::random();
        let mut pets = MockPetRepository::new();
        pets.expect_find_by_id()
            .return_once(move |_| Ok(Some(Pet::restore(id, draft(), Some(owner)))));
        pets.expect_update_details()
            .withf(move |pet| pet.name == "Luna" && pet.owner() == Some(owner))
            .return_once(|_| Ok(true));

        let changes = PetChanges {
            name: Some("Luna".into()),
            ..PetChanges::default()
        };
        service(pets, MockDocumentStorage::new())
            .update_pet(&id, changes)
            .await
            .expect("update succeeds");
    }

    #[tokio::test]
    async fn update_of_unknown_pet_is_not_found() {
        let mut pets = MockPetRepository::new();
        pets.expect_find_by_id().return_once(|_| Ok(None));
        pets.expect_update_details().never();

        let error = service(pets, MockDocumentStorage::new())
            .update_pet(&PetId::random(), PetChanges::default())
            .await
            .expect_err("missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Pet not found");
    }

    #[tokio::test]
    async fn delete_of_unknown_pet_is_not_found() {
        let mut pets = MockPetRepository::new();
        pets.expect_delete().return_once(|_| Ok(false));

        let error = service(pets, MockDocumentStorage::new())
            .delete_pet(&PetId::random())
            .await
            .expect_err("missing");

        assert_eq!(error.message(), "Pet not found");
    }
}
