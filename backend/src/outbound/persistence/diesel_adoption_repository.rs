//! PostgreSQL-backed `AdoptionRepository` implementation using Diesel ORM.
//!
//! The adoption commit runs in a single transaction. The owner row is locked
//! first so a concurrent user delete cannot leave the pet pointing at a
//! removed account, then the pet is claimed with a guarded update
//! (`WHERE adopted = false`). Only the transaction that claims the pet goes
//! on to append it to the owner's list and insert the adoption.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{AdoptionPersistenceError, AdoptionRepository};
use crate::domain::{Adoption, AdoptionCommit, AdoptionId, PetId, UserId};

use super::array_functions::array_append;
use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AdoptionRow, NewAdoptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{adoptions, pets, users};

/// Diesel-backed implementation of the `AdoptionRepository` port.
#[derive(Clone)]
pub struct DieselAdoptionRepository {
    pool: DbPool,
}

impl DieselAdoptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdoptionPersistenceError {
    map_basic_pool_error(error, AdoptionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AdoptionPersistenceError {
    map_basic_diesel_error(
        error,
        AdoptionPersistenceError::query,
        AdoptionPersistenceError::connection,
    )
}

fn row_to_adoption(row: AdoptionRow) -> Adoption {
    Adoption {
        id: AdoptionId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        pet: PetId::from_uuid(row.pet_id),
    }
}

/// Claim the pet for `owner` if it is still unadopted.
async fn try_mark_adopted(
    conn: &mut AsyncPgConnection,
    pet_id: Uuid,
    owner: Uuid,
) -> Result<bool, diesel::result::Error> {
    let claimed = diesel::update(
        pets::table
            .filter(pets::id.eq(pet_id))
            .filter(pets::adopted.eq(false)),
    )
    .set((pets::adopted.eq(true), pets::owner_id.eq(Some(owner))))
    .execute(conn)
    .await?;
    Ok(claimed == 1)
}

#[async_trait]
impl AdoptionRepository for DieselAdoptionRepository {
    async fn record_adoption(
        &self,
        adoption: &Adoption,
    ) -> Result<AdoptionCommit, AdoptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAdoptionRow {
            id: *adoption.id.as_uuid(),
            owner_id: *adoption.owner.as_uuid(),
            pet_id: *adoption.pet.as_uuid(),
        };
        let recorded = adoption.clone();

        conn.transaction(|conn| {
            async move {
                let owner: Option<Uuid> = users::table
                    .find(row.owner_id)
                    .select(users::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if owner.is_none() {
                    return Ok(AdoptionCommit::UserMissing);
                }

                if !try_mark_adopted(conn, row.pet_id, row.owner_id).await? {
                    let pet_exists: bool =
                        diesel::select(diesel::dsl::exists(pets::table.find(row.pet_id)))
                            .get_result(conn)
                            .await?;
                    return Ok(if pet_exists {
                        AdoptionCommit::AlreadyAdopted
                    } else {
                        AdoptionCommit::PetMissing
                    });
                }

                diesel::update(users::table.find(row.owner_id))
                    .set(users::pets.eq(array_append(users::pets, row.pet_id)))
                    .execute(conn)
                    .await?;
                diesel::insert_into(adoptions::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(AdoptionCommit::Recorded(recorded))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &AdoptionId,
    ) -> Result<Option<Adoption>, AdoptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdoptionRow> = adoptions::table
            .find(id.as_uuid())
            .select(AdoptionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_adoption))
    }

    async fn list(&self) -> Result<Vec<Adoption>, AdoptionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AdoptionRow> = adoptions::table
            .order((adoptions::created_at.asc(), adoptions::id.asc()))
            .select(AdoptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_adoption).collect())
    }
}
