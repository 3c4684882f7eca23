//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain aggregates live
//! next to the repository that reads them.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{adoptions, pets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub pets: Vec<Uuid>,
    pub documents: serde_json::Value,
    pub last_connection: Option<DateTime<Utc>>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub pets: Vec<Uuid>,
    pub documents: serde_json::Value,
    pub last_connection: Option<DateTime<Utc>>,
}

/// Changeset for the editable profile columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the pets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub name: String,
    pub specie: String,
    pub birth_date: NaiveDate,
    pub adopted: bool,
    pub owner_id: Option<Uuid>,
    pub image: String,
}

/// Insertable struct for creating new pet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub specie: &'a str,
    pub birth_date: NaiveDate,
    pub adopted: bool,
    pub owner_id: Option<Uuid>,
    pub image: &'a str,
}

/// Changeset for the descriptive pet columns; ownership is never touched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetDetailsUpdate<'a> {
    pub name: &'a str,
    pub specie: &'a str,
    pub birth_date: NaiveDate,
    pub image: &'a str,
}

/// Row struct for reading from the adoptions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = adoptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdoptionRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub pet_id: Uuid,
}

/// Insertable struct for recording an adoption.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = adoptions)]
pub(crate) struct NewAdoptionRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub pet_id: Uuid,
}
