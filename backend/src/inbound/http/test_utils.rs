//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mock_data::MockGenerator;
use mockable::DefaultClock;
use tempfile::TempDir;

use super::session_config::SESSION_COOKIE_NAME;
use super::state::{Backends, HttpState};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{Argon2Hasher, HashingCost};
use crate::outbound::storage::FsDocumentStorage;

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation and the production cookie name, with the
/// `Secure` flag off for plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// In-memory backend with real domain services, for handler tests.
pub struct TestBackend {
    pub state: HttpState,
    pub store: Arc<InMemoryStore>,
    pub uploads: TempDir,
}

/// Build a [`TestBackend`] with a cheap Argon2 cost and a temporary uploads
/// directory.
pub fn in_memory_backend() -> TestBackend {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryStore::new());
    let cheap = HashingCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
    let backends = Backends {
        users: store.clone(),
        pets: store.clone(),
        adoptions: store.clone(),
        hasher: Arc::new(Argon2Hasher::new(cheap).expect("valid cost")),
        storage: Arc::new(FsDocumentStorage::open(uploads.path(), clock.clone()).expect("storage")),
        clock,
    };
    TestBackend {
        state: HttpState::new(backends, MockGenerator::from_seed(42)),
        store,
        uploads,
    }
}
