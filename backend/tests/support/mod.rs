//! Shared helpers for backend integration tests.
//!
//! Each integration test compiles as its own crate, so helpers live here and
//! are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
