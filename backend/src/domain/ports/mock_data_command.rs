//! Driving port for mock data generation.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, Pet, User};

/// Users and pets inserted by [`MockDataCommand::generate_data`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedData {
    /// Inserted users.
    pub users: Vec<User>,
    /// Inserted pets.
    pub pets: Vec<Pet>,
}

/// Use-case port for demonstration data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MockDataCommand: Send + Sync {
    /// Generate `count` pets without storing them.
    async fn mock_pets(&self, count: usize) -> Result<Vec<Pet>, Error>;

    /// Generate `count` users without storing them.
    async fn mock_users(&self, count: usize) -> Result<Vec<User>, Error>;

    /// Generate and store `users` users and `pets` pets.
    async fn generate_data(&self, users: usize, pets: usize) -> Result<GeneratedData, Error>;
}
