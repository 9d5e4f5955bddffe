//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: lock-guarded maps for database-less runs and tests
//! - **crypto**: Argon2id password hashing
//! - **token**: HS256 bearer tokens
//! - **federated**: Google ID-token verification
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod crypto;
pub mod federated;
pub mod memory;
pub mod persistence;
pub mod token;
