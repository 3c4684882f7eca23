//! Port abstraction for adoption records and the atomic adoption commit.

use async_trait::async_trait;

use crate::domain::{Adoption, AdoptionCommit, AdoptionId, Error};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by adoption repository adapters.
    pub enum AdoptionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "adoption repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "adoption repository query failed: {message}",
    }
}

impl From<AdoptionPersistenceError> for Error {
    fn from(value: AdoptionPersistenceError) -> Self {
        match value {
            AdoptionPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            AdoptionPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

/// Adoption record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionRepository: Send + Sync {
    /// Apply an adoption as one all-or-nothing unit.
    ///
    /// Implementations must:
    /// 1. mark the pet adopted by `adoption.owner` only if it is not adopted
    ///    yet (compare-and-set), reporting [`AdoptionCommit::AlreadyAdopted`]
    ///    otherwise;
    /// 2. append the pet to the owner's pet list;
    /// 3. insert `adoption`.
    ///
    /// When any step cannot be applied, none of them are.
    async fn record_adoption(
        &self,
        adoption: &Adoption,
    ) -> Result<AdoptionCommit, AdoptionPersistenceError>;

    /// Fetch an adoption by identifier.
    async fn find_by_id(
        &self,
        id: &AdoptionId,
    ) -> Result<Option<Adoption>, AdoptionPersistenceError>;

    /// List every adoption in insertion order.
    async fn list(&self) -> Result<Vec<Adoption>, AdoptionPersistenceError>;
}
