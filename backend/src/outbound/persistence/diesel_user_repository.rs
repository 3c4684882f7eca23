//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, PetId, Role, User, UserDocument, UserId, UserProfile};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pets, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Like [`map_diesel_error`], but reports unique violations on `email`.
fn map_write_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_email(email.as_str());
    }
    map_diesel_error(error)
}

fn encode_documents(documents: &[UserDocument]) -> Result<serde_json::Value, UserPersistenceError> {
    serde_json::to_value(documents)
        .map_err(|err| UserPersistenceError::query(format!("serialise documents: {err}")))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = Email::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    let role: Role = row
        .role
        .parse()
        .map_err(|err| UserPersistenceError::query(format!("stored role invalid: {err}")))?;
    let documents: Vec<UserDocument> = serde_json::from_value(row.documents)
        .map_err(|err| UserPersistenceError::query(format!("stored documents invalid: {err}")))?;

    let profile = UserProfile {
        first_name: row.first_name,
        last_name: row.last_name,
        email,
        role,
    };
    let mut user = User::new(
        UserId::from_uuid(row.id),
        profile,
        PasswordHash::from_encoded(row.password),
    );
    user.pets = row.pets.into_iter().map(PetId::from_uuid).collect();
    user.documents = documents;
    user.last_connection = row.last_connection;
    Ok(user)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: user.email.as_str(),
            password: user.password.as_str(),
            role: user.role.as_str(),
            pets: user.pets.iter().map(|pet| *pet.as_uuid()).collect(),
            documents: encode_documents(&user.documents)?,
            last_connection: user.last_connection,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &user.email))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserProfileUpdate {
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: user.email.as_str(),
            role: user.role.as_str(),
        };

        let updated = diesel::update(users::table.find(user.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &user.email))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = *id.as_uuid();

        conn.transaction(|conn| {
            async move {
                diesel::update(pets::table.filter(pets::owner_id.eq(user_id)))
                    .set((pets::adopted.eq(false), pets::owner_id.eq(None::<uuid::Uuid>)))
                    .execute(conn)
                    .await?;
                let deleted = diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .await?;
                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(id.as_uuid()))
            .set(users::last_connection.eq(Some(at)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn append_documents(
        &self,
        id: &UserId,
        documents: &[UserDocument],
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let appended = encode_documents(documents)?;
        let user_id = *id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let current: Option<serde_json::Value> = users::table
                    .find(user_id)
                    .select(users::documents)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(current) = current else {
                    return Ok(false);
                };

                let merged = merge_document_arrays(current, appended);
                diesel::update(users::table.find(user_id))
                    .set(users::documents.eq(merged))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

fn merge_document_arrays(current: serde_json::Value, appended: serde_json::Value) -> serde_json::Value {
    let mut merged = match current {
        serde_json::Value::Array(items) => items,
        _ => Vec::new(),
    };
    if let serde_json::Value::Array(items) = appended {
        merged.extend(items);
    }
    serde_json::Value::Array(merged)
}
