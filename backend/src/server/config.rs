//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use adoptme::inbound::http::session_config::SessionSettings;
use adoptme::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs beyond the health state.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) uploads_dir: PathBuf,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mock_seed: Option<u64>,
    pub(crate) detailed_access_log: bool,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store with compact access logs.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, uploads_dir: PathBuf) -> Self {
        Self {
            session,
            bind_addr,
            uploads_dir,
            db_pool: None,
            mock_seed: None,
            detailed_access_log: false,
        }
    }

    /// Persist through PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed mock generation so repeated runs produce the same data.
    #[must_use]
    pub fn with_mock_seed(mut self, seed: Option<u64>) -> Self {
        self.mock_seed = seed;
        self
    }

    /// Log peer address, user agent and referrer for every request.
    #[must_use]
    pub fn with_detailed_access_log(mut self, detailed: bool) -> Self {
        self.detailed_access_log = detailed;
        self
    }
}
