//! Driving port for reading adoption records.

use async_trait::async_trait;

use crate::domain::{Adoption, AdoptionId, Error};

/// Read-side port for adoptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionQuery: Send + Sync {
    /// Every adoption; empty when none exist.
    async fn list_adoptions(&self) -> Result<Vec<Adoption>, Error>;

    /// A single adoption, or `Adoption not found` (404).
    async fn get_adoption(&self, id: &AdoptionId) -> Result<Adoption, Error>;
}
