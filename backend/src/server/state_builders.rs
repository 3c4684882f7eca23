//! Builders wiring outbound adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use mock_data::MockGenerator;
use mockable::{Clock, DefaultClock};
use tracing::info;

use adoptme::domain::ports::{AdoptionRepository, PetRepository, UserRepository};
use adoptme::inbound::http::state::{Backends, HttpState};
use adoptme::outbound::memory::InMemoryStore;
use adoptme::outbound::persistence::{
    DbPool, DieselAdoptionRepository, DieselPetRepository, DieselUserRepository,
};
use adoptme::outbound::security::{Argon2Hasher, HashingCost};
use adoptme::outbound::storage::FsDocumentStorage;

use super::ServerConfig;

type Stores = (
    Arc<dyn UserRepository>,
    Arc<dyn PetRepository>,
    Arc<dyn AdoptionRepository>,
);

fn build_stores(pool: Option<&DbPool>) -> Stores {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            (
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPetRepository::new(pool.clone())),
                Arc::new(DieselAdoptionRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; using in-memory store");
            let store = Arc::new(InMemoryStore::new());
            (store.clone(), store.clone(), store)
        }
    }
}

fn build_generator(seed: Option<u64>) -> MockGenerator {
    match seed {
        Some(seed) => {
            info!(seed, "mock generation seeded");
            MockGenerator::from_seed(seed)
        }
        None => MockGenerator::from_os_rng(),
    }
}

/// Build the handler state for `config`.
///
/// # Errors
///
/// Returns [`io::Error`] when the uploads directory cannot be opened or the
/// password hasher rejects its parameters.
pub(crate) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (users, pets, adoptions) = build_stores(config.db_pool.as_ref());
    let hasher = Argon2Hasher::new(HashingCost::default()).map_err(io::Error::other)?;
    let storage =
        FsDocumentStorage::open(&config.uploads_dir, Arc::clone(&clock)).map_err(io::Error::other)?;
    info!(path = %config.uploads_dir.display(), "uploads directory ready");

    let backends = Backends {
        users,
        pets,
        adoptions,
        hasher: Arc::new(hasher),
        storage: Arc::new(storage),
        clock,
    };
    Ok(HttpState::new(backends, build_generator(config.mock_seed)))
}
