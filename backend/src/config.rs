//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ADOPTME_*` environment variables, an optional
//! configuration file and command-line flags. Unset values fall back to the
//! defaults exposed by the accessors below.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOADS_DIR: &str = "public";

/// Deployment environment; production switches logs to JSON and enables the
/// detailed access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Raised for setting values that parse but are not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("ADOPTME_HOST is not an IP address: {0}")]
    InvalidHost(String),
    #[error("ADOPTME_ENVIRONMENT must be `development` or `production`, got {0}")]
    InvalidEnvironment(String),
}

/// Server settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADOPTME")]
pub struct AppSettings {
    /// Interface to bind, default `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind, default 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Root directory for uploaded files, default `public`.
    pub uploads_dir: Option<PathBuf>,
    /// `development` (default) or `production`.
    pub environment: Option<String>,
    /// Seed for deterministic mock generation.
    pub mock_seed: Option<u64>,
}

impl AppSettings {
    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(raw) => raw
                .parse()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    pub fn uploads_dir(&self) -> &Path {
        self.uploads_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOADS_DIR))
    }

    pub fn environment(&self) -> Result<Environment, SettingsError> {
        match self.environment.as_deref().map(str::trim) {
            None | Some("") => Ok(Environment::Development),
            Some(raw) if raw.eq_ignore_ascii_case("development") => Ok(Environment::Development),
            Some(raw) if raw.eq_ignore_ascii_case("production") => Ok(Environment::Production),
            Some(raw) => Err(SettingsError::InvalidEnvironment(raw.to_owned())),
        }
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}
