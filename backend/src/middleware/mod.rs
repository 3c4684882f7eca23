//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! trace correlation and access logging.

pub mod access_log;
pub mod trace;

pub use access_log::AccessLog;
pub use trace::Trace;
