//! In-process repository adapters.
//!
//! Used by debug builds without a database and by the HTTP integration tests.
//! Each operation takes one lock, so single-record writes are atomic just as
//! they are against PostgreSQL.

mod account_repository;
mod complaint_repository;

pub use account_repository::InMemoryAccountRepository;
pub use complaint_repository::InMemoryComplaintRepository;

fn poisoned<E>(ctor: impl FnOnce(String) -> E) -> E {
    ctor("in-memory store lock poisoned".to_owned())
}
