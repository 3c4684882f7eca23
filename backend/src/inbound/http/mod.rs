//! HTTP inbound adapter exposing the JSON API, probes and landing page.

pub mod adoptions;
pub mod envelope;
pub mod error;
pub mod health;
pub mod home;
pub mod mocks;
pub mod multipart;
pub mod pets;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;
