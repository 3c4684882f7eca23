//! In-process HTTP harness shared by the behaviour suites.
//!
//! Each request runs against a freshly initialised `App` over the same
//! in-memory store and session key, so state and cookies carry across steps.

use std::future::Future;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::rt::SystemRunner;
use actix_web::{App, test, web};
use adoptme::Trace;
use adoptme::inbound::http::routes::configure_api;
use adoptme::inbound::http::session_config::SESSION_COOKIE_NAME;
use adoptme::inbound::http::state::{Backends, HttpState};
use adoptme::outbound::memory::InMemoryStore;
use adoptme::outbound::security::{Argon2Hasher, HashingCost};
use adoptme::outbound::storage::FsDocumentStorage;
use mock_data::MockGenerator;
use mockable::DefaultClock;
use serde_json::Value;
use tempfile::TempDir;

/// Seed used for mock generation in every suite.
pub const MOCK_SEED: u64 = 42;

/// Status, session cookie and JSON body of one response.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub cookie: Option<Cookie<'static>>,
    pub body: Value,
}

pub struct TestApp {
    runner: SystemRunner,
    state: HttpState,
    key: Key,
    _uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
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
            adoptions: store,
            hasher: Arc::new(Argon2Hasher::new(cheap).expect("valid cost")),
            storage: Arc::new(
                FsDocumentStorage::open(uploads.path(), clock.clone()).expect("storage"),
            ),
            clock,
        };
        Self {
            runner: actix_web::rt::System::new(),
            state: HttpState::new(backends, MockGenerator::from_seed(MOCK_SEED)),
            key: Key::generate(),
            _uploads: uploads,
        }
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runner.block_on(future)
    }

    pub fn send(&self, request: test::TestRequest) -> Reply {
        self.block_on(self.dispatch(request))
    }

    pub async fn dispatch(&self, request: test::TestRequest) -> Reply {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_secure(false)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .wrap(session)
                .wrap(Trace)
                .configure(configure_api),
        )
        .await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(Cookie::into_owned);
        let bytes = test::read_body(response).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            cookie,
            body,
        }
    }
}
