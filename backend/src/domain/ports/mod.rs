//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`DocumentStorage`])
//! are implemented by outbound adapters. Driving ports (`*Command`,
//! `*Query`, [`LoginService`], [`RegistrationService`]) are implemented by
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod adoption_command;
mod adoption_query;
mod adoption_repository;
mod document_storage;
mod login_service;
mod mock_data_command;
mod password_hasher;
mod pet_repository;
mod pets_command;
mod pets_query;
mod registration_service;
mod user_repository;
mod users_command;
mod users_query;

pub use adoption_command::AdoptionCommand;
#[cfg(test)]
pub use adoption_command::MockAdoptionCommand;
pub use adoption_query::AdoptionQuery;
#[cfg(test)]
pub use adoption_query::MockAdoptionQuery;
#[cfg(test)]
pub use adoption_repository::MockAdoptionRepository;
pub use adoption_repository::{AdoptionPersistenceError, AdoptionRepository};
#[cfg(test)]
pub use document_storage::MockDocumentStorage;
pub use document_storage::{DocumentStorage, DocumentStorageError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use mock_data_command::MockMockDataCommand;
pub use mock_data_command::{GeneratedData, MockDataCommand};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHashingError};
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{PetPersistenceError, PetRepository};
#[cfg(test)]
pub use pets_command::MockPetsCommand;
pub use pets_command::PetsCommand;
#[cfg(test)]
pub use pets_query::MockPetsQuery;
pub use pets_query::PetsQuery;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
