//! PostgreSQL-backed `PetRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{NewPet, Pet, PetId, UserId};

use super::array_functions::array_remove;
use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPetRow, PetDetailsUpdate, PetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pets, users};

/// Diesel-backed implementation of the `PetRepository` port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PetPersistenceError {
    map_basic_pool_error(error, PetPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PetPersistenceError {
    map_basic_diesel_error(
        error,
        PetPersistenceError::query,
        PetPersistenceError::connection,
    )
}

fn row_to_pet(row: PetRow) -> Pet {
    if row.adopted != row.owner_id.is_some() {
        tracing::warn!(pet_id = %row.id, "pet row has inconsistent adoption state");
    }
    let draft = NewPet {
        name: row.name,
        specie: row.specie,
        birth_date: row.birth_date,
        image: row.image,
    };
    Pet::restore(
        PetId::from_uuid(row.id),
        draft,
        row.owner_id.map(UserId::from_uuid),
    )
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPetRow {
            id: *pet.id.as_uuid(),
            name: &pet.name,
            specie: &pet.specie,
            birth_date: pet.birth_date,
            adopted: pet.is_adopted(),
            owner_id: pet.owner().map(|owner| *owner.as_uuid()),
            image: &pet.image,
        };

        diesel::insert_into(pets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PetRow> = pets::table
            .find(id.as_uuid())
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_pet))
    }

    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PetRow> = pets::table
            .order((pets::created_at.asc(), pets::id.asc()))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_pet).collect())
    }

    async fn update_details(&self, pet: &Pet) -> Result<bool, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PetDetailsUpdate {
            name: &pet.name,
            specie: &pet.specie,
            birth_date: pet.birth_date,
            image: &pet.image,
        };

        let updated = diesel::update(pets::table.find(pet.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pet_id = *id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let owner: Option<Option<Uuid>> = diesel::delete(pets::table.find(pet_id))
                    .returning(pets::owner_id)
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(owner) = owner else {
                    return Ok(false);
                };

                if let Some(owner) = owner {
                    diesel::update(users::table.find(owner))
                        .set(users::pets.eq(array_remove(users::pets, pet_id)))
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
