//! PostgreSQL persistence adapters using Diesel.
//!
//! - Repository implementations only translate between row structs and
//!   domain types; no business rules live here.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) stay private.
//! - Connections come from a `bb8` pool over `diesel-async`.
//! - Every database failure is mapped onto the port's error enum.
//!
//! ```ignore
//! use hostelops::outbound::persistence::{DbPool, DieselComplaintRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hostelops")).await?;
//! let complaints = DieselComplaintRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_complaint_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_complaint_repository::DieselComplaintRepository;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
