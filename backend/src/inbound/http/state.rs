//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mock_data::MockGenerator;
use mockable::Clock;

use crate::domain::ports::{
    AdoptionCommand, AdoptionQuery, AdoptionRepository, DocumentStorage, LoginService,
    MockDataCommand, PasswordHasher, PetRepository, PetsCommand, PetsQuery, RegistrationService,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{AdoptionService, MockDataService, PetsService, SessionService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub adoptions: Arc<dyn AdoptionCommand>,
    pub adoptions_query: Arc<dyn AdoptionQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub pets: Arc<dyn PetsQuery>,
    pub pets_command: Arc<dyn PetsCommand>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub mocks: Arc<dyn MockDataCommand>,
}

/// Driven adapters the domain services are built over.
#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub adoptions: Arc<dyn AdoptionRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub storage: Arc<dyn DocumentStorage>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every driving port to its domain service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use adoptme::inbound::http::state::{Backends, HttpState};
    /// use adoptme::outbound::memory::InMemoryStore;
    /// use adoptme::outbound::security::{Argon2Hasher, HashingCost};
    /// use adoptme::outbound::storage::FsDocumentStorage;
    /// use mock_data::MockGenerator;
    /// use mockable::DefaultClock;
    ///
    /// let dir = std::env::temp_dir().join("adoptme-state-doctest");
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryStore::new());
    /// let backends = Backends {
    ///     users: store.clone(),
    ///     pets: store.clone(),
    ///     adoptions: store,
    ///     hasher: Arc::new(Argon2Hasher::new(HashingCost::default()).expect("valid cost")),
    ///     storage: Arc::new(FsDocumentStorage::open(&dir, clock.clone()).expect("uploads dir")),
    ///     clock,
    /// };
    /// let state = HttpState::new(backends, MockGenerator::from_seed(7));
    /// let _pets = state.pets.clone();
    /// ```
    pub fn new(backends: Backends, generator: MockGenerator) -> Self {
        let Backends {
            users,
            pets,
            adoptions,
            hasher,
            storage,
            clock,
        } = backends;

        let adoption = Arc::new(AdoptionService::new(
            Arc::clone(&users),
            Arc::clone(&pets),
            adoptions,
        ));
        let users_service = Arc::new(UsersService::new(Arc::clone(&users), Arc::clone(&storage)));
        let pets_service = Arc::new(PetsService::new(Arc::clone(&pets), storage));
        let session = Arc::new(SessionService::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
            Arc::clone(&clock),
        ));
        let mocks = Arc::new(MockDataService::new(users, pets, hasher, clock, generator));

        Self {
            adoptions: adoption.clone(),
            adoptions_query: adoption,
            users: users_service.clone(),
            users_command: users_service,
            pets: pets_service.clone(),
            pets_command: pets_service,
            login: session.clone(),
            registration: session,
            mocks,
        }
    }
}
