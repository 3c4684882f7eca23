//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities used by the HTTP and persistence
//! layers and the services that implement the driving ports. Keep types
//! small and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User, Pet, Adoption: aggregates exposed over the API.
//! - `*Service`: driving port implementations wired by the server.

pub mod adoption;
mod adoption_service;
pub mod auth;
pub mod error;
pub mod ids;
mod mock_data_service;
pub mod pet;
mod pets_service;
pub mod ports;
mod session_service;
mod trace_id;
pub mod upload;
pub mod user;
mod users_service;

pub use self::adoption::{Adoption, AdoptionCommit, AdoptionError};
pub use self::adoption_service::AdoptionService;
pub use self::auth::{IncompleteValues, LoginCredentials, Registration};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{AdoptionId, IdValidationError, PetId, UserId};
pub use self::mock_data_service::{MOCK_PASSWORD, MockDataService};
pub use self::pet::{NewPet, Pet, PetChanges, PetValidationError};
pub use self::pets_service::PetsService;
pub use self::session_service::SessionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{UploadFolder, UploadedFile};
pub use self::user::{
    Email, PasswordHash, Role, User, UserChanges, UserDocument, UserProfile, UserValidationError,
};
pub use self::users_service::UsersService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use adoptme::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Not authenticated"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
