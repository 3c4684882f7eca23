//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models`, `schema`) and
//! domain aggregates; neither escapes this module. Connections come from a
//! `bb8` pool over `diesel-async`, and every database failure is mapped to
//! the matching port error.
//!
//! # Example
//!
//! ```no_run
//! use adoptme::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/adoptme")).await?;
//! let pets = DieselPetRepository::new(pool);
//! # let _ = pets;
//! # Ok(())
//! # }
//! ```

mod array_functions;
mod diesel_adoption_repository;
mod diesel_basic_error_mapping;
mod diesel_pet_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_adoption_repository::DieselAdoptionRepository;
pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
