//! Deterministic mock pet and user generation.
//!
//! This crate produces believable pets and users for demonstration endpoints
//! and database seeding. It is independent of backend domain types: callers
//! map the returned seeds onto their own records, assign identifiers, and
//! hash passwords.
//!
//! # Overview
//!
//! - [`MockGenerator`] owns a seeded `ChaCha8Rng`, so the same seed always
//!   yields the same stream of pets and users.
//! - Successive batches continue the stream. Generated emails are unique
//!   within one batch; earlier batches are not remembered.
//! - Batch sizes are capped at [`MAX_BATCH_SIZE`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use mock_data::{MockGenerator, PET_SPECIES};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
//! let mut generator = MockGenerator::from_seed(42);
//! let pets = generator.pets(3, today).expect("pets generated");
//!
//! assert_eq!(pets.len(), 3);
//! assert!(pets.iter().all(|pet| PET_SPECIES.contains(&pet.specie)));
//! ```

mod error;
mod generator;
mod seed;

pub use error::GenerationError;
pub use generator::{MAX_BATCH_SIZE, MAX_PET_AGE_DAYS, MockGenerator, PET_SPECIES};
pub use seed::{PetSeed, RoleSeed, UserSeed};
