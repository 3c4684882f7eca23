//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local store used without a database
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2id password hashing
//! - **storage**: filesystem storage for uploads
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
pub mod storage;
